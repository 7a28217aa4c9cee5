use anyhow::{anyhow, Context, Result};
use std::str::FromStr;

/// Property ingest settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Whether ingest and persistence run at all.
    pub enable_property_ingest: bool,
    /// Base URL of the external properties API.
    pub base_url: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            enable_property_ingest: false,
            base_url: "https://www.studentproperties.com".to_string(),
        }
    }
}

impl IngestConfig {
    /// Reads `PROPERTY_INGEST_ENABLED` and `PROPERTY_INGEST_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            enable_property_ingest: parse_var(
                &var,
                "PROPERTY_INGEST_ENABLED",
                defaults.enable_property_ingest,
            )?,
            base_url: var("PROPERTY_INGEST_BASE_URL").unwrap_or(defaults.base_url),
        })
    }
}

/// Database connection pool configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://rental_ingest.db".to_string(),
            max_connections: 5,
        }
    }
}

impl DbConfig {
    /// Reads `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS`.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            database_url: var("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: parse_var(
                &var,
                "DATABASE_MAX_CONNECTIONS",
                defaults.max_connections,
            )?,
        })
    }
}

fn parse_var<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Some(value) => value
            .trim()
            .to_ascii_lowercase()
            .parse()
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("Invalid value for {key}: {value:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_ingest_config_defaults() {
        let config = IngestConfig::default();
        assert!(!config.enable_property_ingest);
        assert_eq!(config.base_url, "https://www.studentproperties.com");

        assert_eq!(IngestConfig::from_vars(vars(&[])).unwrap(), config);
    }

    #[test]
    fn test_ingest_config_from_vars() {
        let config = IngestConfig::from_vars(vars(&[
            ("PROPERTY_INGEST_ENABLED", "True"),
            ("PROPERTY_INGEST_BASE_URL", "http://localhost:5000"),
        ]))
        .unwrap();

        assert!(config.enable_property_ingest);
        assert_eq!(config.base_url, "http://localhost:5000");
    }

    #[test]
    fn test_ingest_config_rejects_bad_flag() {
        let err = IngestConfig::from_vars(vars(&[("PROPERTY_INGEST_ENABLED", "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("PROPERTY_INGEST_ENABLED"));
    }

    #[test]
    fn test_db_config_defaults() {
        let config = DbConfig::default();
        assert_eq!(config.database_url, "sqlite://rental_ingest.db");
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_db_config_from_vars() {
        let config = DbConfig::from_vars(vars(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", " 1 "),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 1);

        assert!(DbConfig::from_vars(vars(&[("DATABASE_MAX_CONNECTIONS", "-3")])).is_err());
    }
}
