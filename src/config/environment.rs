//! Environment configuration
//!
//! Reads the service settings from environment variables (and `.env` through
//! `dotenvy` in `main`). Every variable has a development default.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::utils::errors::{AppError, AppResult};

/// Environment configuration
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    /// JSON catalog to serve; the bundled sample catalog when unset.
    pub catalog_path: Option<PathBuf>,
    pub submission_base_url: String,
    pub submission_timeout: Duration,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: vec!["http://localhost:5173".to_string()],
            catalog_path: None,
            submission_base_url: "http://localhost:8787/forms".to_string(),
            submission_timeout: Duration::from_secs(10),
        }
    }
}

impl EnvironmentConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            environment: non_empty("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var(&non_empty, "PORT")?.unwrap_or(defaults.port),
            host: non_empty("HOST").unwrap_or(defaults.host),
            cors_origins: non_empty("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            catalog_path: non_empty("CATALOG_PATH").map(PathBuf::from),
            submission_base_url: non_empty("SUBMISSION_BASE_URL")
                .unwrap_or(defaults.submission_base_url),
            submission_timeout: parse_var(&non_empty, "SUBMISSION_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.submission_timeout),
        })
    }

    /// Check whether we run in development mode
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Address the server binds to
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| AppError::Config(format!("{} must be a valid number, got '{}'", key, raw)))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EnvironmentConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.is_development());
        assert_eq!(config.port, 3000);
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.server_url(), "0.0.0.0:3000");
    }

    #[test]
    fn test_reads_variables() {
        let config = EnvironmentConfig::from_lookup(lookup(&[
            ("ENVIRONMENT", "production"),
            ("PORT", "8080"),
            ("CORS_ORIGINS", "https://example.com, https://www.example.com,"),
            ("CATALOG_PATH", "/srv/catalog.json"),
            ("SUBMISSION_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.environment, "production");
        assert!(!config.is_development());
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.cors_origins,
            vec!["https://example.com", "https://www.example.com"]
        );
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/catalog.json")));
        assert_eq!(config.submission_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_malformed_port_is_config_error() {
        let err = EnvironmentConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("PORT")));
    }
}
