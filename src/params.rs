//! Route parameter resolution.
//!
//! Dynamic pages receive their `_id` segment either as a value that is already
//! available or as a future that produces it later. [`resolve`] is the only
//! way pages read the id, so neither shape leaks into the page code.

use std::fmt;

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// Path parameters of the `/note/:_id`, `/test/:_id` and `/submission/:_id` routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParams {
    #[serde(rename = "_id")]
    pub id: String,
}

impl RouteParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub enum ParamSource {
    Ready(RouteParams),
    Deferred(BoxFuture<'static, Result<RouteParams, ParamError>>),
}

impl ParamSource {
    pub fn ready(id: impl Into<String>) -> Self {
        ParamSource::Ready(RouteParams::new(id))
    }

    pub fn deferred<F>(future: F) -> Self
    where
        F: std::future::Future<Output = Result<RouteParams, ParamError>> + Send + 'static,
    {
        ParamSource::Deferred(Box::pin(future))
    }
}

impl From<RouteParams> for ParamSource {
    fn from(params: RouteParams) -> Self {
        ParamSource::Ready(params)
    }
}

impl fmt::Debug for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamSource::Ready(params) => f.debug_tuple("Ready").field(params).finish(),
            ParamSource::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Resolves a parameter source to the plain `_id` string, unmodified.
pub async fn resolve(source: ParamSource) -> Result<String, ParamError> {
    let params = match source {
        ParamSource::Ready(params) => params,
        ParamSource::Deferred(pending) => pending.await?,
    };

    Ok(params.id)
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ready_and_deferred_resolve_to_the_same_id() {
        let ready = resolve(ParamSource::ready("abc123")).await;
        let deferred = resolve(ParamSource::deferred(async {
            tokio::task::yield_now().await;
            Ok(RouteParams::new("abc123"))
        }))
        .await;

        assert_eq!(ready, Ok("abc123".to_string()));
        assert_eq!(deferred, ready);
    }

    #[tokio::test]
    async fn ids_pass_through_untouched() {
        for id in ["", " ", "a/b?c=d&e#f", "ünïcødé ✓", "%2F", "<script>"] {
            assert_eq!(resolve(ParamSource::ready(id)).await.as_deref(), Ok(id));
            let owned = id.to_string();
            let deferred = ParamSource::deferred(async move { Ok(RouteParams::new(owned)) });
            assert_eq!(resolve(deferred).await.as_deref(), Ok(id));
        }
    }

    #[tokio::test]
    async fn deferred_failure_is_reported() {
        let source = ParamSource::deferred(async { Err(ParamError::Missing) });
        assert_eq!(resolve(source).await, Err(ParamError::Missing));
    }

    #[test]
    fn params_use_underscore_id_key() {
        let params: RouteParams = serde_json::from_str(r#"{"_id":"n1"}"#).unwrap();
        assert_eq!(params, RouteParams::new("n1"));
    }
}
