//! Environment-driven server configuration.

use std::{env, fmt::Display, str::FromStr};

use log::info;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key} value `{value}`: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub log_level: String,
    /// `None` logs to stderr.
    pub log_dir: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: try_load(&lookup, "JOKES_HOST", "127.0.0.1")?,
            port: try_load(&lookup, "JOKES_PORT", "3000")?,
            db_path: try_load(&lookup, "JOKES_DB_PATH", "jokes.sqlite3")?,
            log_level: try_load(&lookup, "JOKES_LOG_LEVEL", jokes_core::default_log_level())?,
            log_dir: lookup("JOKES_LOG_DIR").filter(|dir| !dir.trim().is_empty()),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    let parsed = value.trim().parse::<T>();
    parsed.map_err(|err| ConfigError::Invalid {
        key,
        reason: err.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{Config, ConfigError};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();

        assert_eq!(config.address(), "127.0.0.1:3000");
        assert_eq!(config.db_path, "jokes.sqlite3");
        assert_eq!(config.log_level, jokes_core::default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("JOKES_HOST", "0.0.0.0"),
            ("JOKES_PORT", " 8080 "),
            ("JOKES_DB_PATH", "/var/lib/jokes/db.sqlite3"),
            ("JOKES_LOG_LEVEL", "warn"),
            ("JOKES_LOG_DIR", "/var/log/jokes"),
        ]))
        .unwrap();

        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(config.db_path, "/var/lib/jokes/db.sqlite3");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/jokes"));
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("JOKES_PORT", "seventy")])).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid { key: "JOKES_PORT", ref value, .. } if value == "seventy"
        ));
    }

    #[test]
    fn blank_log_dir_means_stderr() {
        let config = Config::from_lookup(lookup_from(&[("JOKES_LOG_DIR", "  ")])).unwrap();
        assert_eq!(config.log_dir, None);
    }
}
