use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// MongoDB connection string; without one the server keeps data in memory.
    pub mongo_url: Option<String>,
    pub database: String,
    /// Text shown in place of the counter when it cannot be read.
    pub counter_fallback: String,
    pub static_dir: String,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        Ok(Self {
            port: try_load(&lookup, "STUDYHALL_PORT", "3001")?,
            mongo_url: lookup("STUDYHALL_MONGO_URL").filter(|url| !url.trim().is_empty()),
            database: try_load(&lookup, "STUDYHALL_DATABASE", "studyhall")?,
            counter_fallback: lookup("STUDYHALL_COUNTER_FALLBACK").unwrap_or_default(),
            static_dir: try_load(
                &lookup,
                "STUDYHALL_STATIC_DIR",
                "target/dx/studyhall/release/web/public",
            )?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, AppError>
where
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            AppError::Config(format!("{key}: {e}"))
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.port, 3001);
        assert_eq!(config.mongo_url, None);
        assert_eq!(config.database, "studyhall");
        assert_eq!(config.counter_fallback, "");
    }

    #[test]
    fn values_are_read_from_the_environment() {
        let config = Config::from_lookup(lookup(&[
            ("STUDYHALL_PORT", "8080"),
            ("STUDYHALL_MONGO_URL", "mongodb://localhost:27017"),
            ("STUDYHALL_COUNTER_FALLBACK", "…"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.mongo_url.as_deref(), Some("mongodb://localhost:27017"));
        assert_eq!(config.counter_fallback, "…");
    }

    #[test]
    fn blank_mongo_url_means_memory() {
        let config = Config::from_lookup(lookup(&[("STUDYHALL_MONGO_URL", "  ")])).unwrap();
        assert_eq!(config.mongo_url, None);
    }

    #[test]
    fn bad_port_is_a_config_error() {
        let err = Config::from_lookup(lookup(&[("STUDYHALL_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.starts_with("STUDYHALL_PORT")));
    }
}
