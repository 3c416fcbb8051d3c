//! The public counter shown on the landing page.
//!
//! The value lives in the `counter` field of the `global/public` document and
//! is updated elsewhere; this module only reads and displays it.

#![allow(non_snake_case)]

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

pub const COUNTER_COLLECTION: &str = "global";
pub const COUNTER_DOCUMENT: &str = "public";
pub const COUNTER_FIELD: &str = "counter";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterReading {
    Value(i64),
    Missing,
}

impl CounterReading {
    pub fn display(&self, fallback: &str) -> String {
        match self {
            CounterReading::Value(n) => n.to_string(),
            CounterReading::Missing => fallback.to_string(),
        }
    }
}

/// Wire form of the counter served to the web client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterPayload {
    pub counter: Option<i64>,
    pub fallback: String,
}

impl CounterPayload {
    pub fn new(reading: CounterReading, fallback: impl Into<String>) -> Self {
        let counter = match reading {
            CounterReading::Value(n) => Some(n),
            CounterReading::Missing => None,
        };
        Self {
            counter,
            fallback: fallback.into(),
        }
    }

    pub fn reading(&self) -> CounterReading {
        self.counter.map_or(CounterReading::Missing, CounterReading::Value)
    }

    pub fn text(&self) -> String {
        self.reading().display(&self.fallback)
    }
}

#[cfg(feature = "server")]
pub use source::{read_counter, CounterSource};

#[cfg(feature = "server")]
mod source {
    use std::sync::Arc;

    use serde_json::Value;
    use tracing::warn;

    use super::*;
    use crate::{
        error::StoreError,
        store::{Document, DocumentStore},
    };

    impl CounterReading {
        pub fn from_document(document: Option<&Document>) -> Self {
            document
                .and_then(|document| document.get(COUNTER_FIELD))
                .and_then(counter_value)
                .map_or(CounterReading::Missing, CounterReading::Value)
        }
    }

    // counters written from JS land as doubles
    fn counter_value(value: &Value) -> Option<i64> {
        if let Some(n) = value.as_i64() {
            return Some(n);
        }
        value
            .as_f64()
            .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
            .map(|n| n as i64)
    }

    pub async fn read_counter(store: &dyn DocumentStore) -> Result<CounterReading, StoreError> {
        let document = store.get(COUNTER_COLLECTION, COUNTER_DOCUMENT).await?;
        Ok(CounterReading::from_document(document.as_ref()))
    }

    /// Store handle plus the text to show when there is no value.
    #[derive(Clone)]
    pub struct CounterSource {
        store: Arc<dyn DocumentStore>,
        fallback: String,
    }

    impl CounterSource {
        pub fn new(store: Arc<dyn DocumentStore>, fallback: impl Into<String>) -> Self {
            Self {
                store,
                fallback: fallback.into(),
            }
        }

        pub async fn load(&self) -> CounterPayload {
            let reading = match read_counter(self.store.as_ref()).await {
                Ok(reading) => reading,
                Err(e) => {
                    warn!("Failed to read {COUNTER_COLLECTION}/{COUNTER_DOCUMENT}: {e}");
                    CounterReading::Missing
                }
            };
            CounterPayload::new(reading, self.fallback.clone())
        }
    }
}

#[component]
pub fn CounterDisplay(text: String) -> Element {
    rsx! {
        p { style: "font-family:sans-serif;",
            "Visitors: "
            span { id: "number", "{text}" }
        }
    }
}
