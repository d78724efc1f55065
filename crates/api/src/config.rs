//! Application configuration loaded from environment variables.

use std::time::Duration;

use plant_id::ClientConfig;
use thiserror::Error;

/// Configuration that prevents the server from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable '{0}' is not set")]
    MissingVar(&'static str),
}

/// Server configuration.
///
/// Reads from environment variables:
/// - `PLANT_ID_API_KEY`: provider API key (required)
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `5000`)
/// - `PLANT_ID_ENDPOINT`: identification URL (default: Plant.id v3)
/// - `PLANT_ID_TIMEOUT_SECS`: provider call timeout (default: `30`)
/// - `IMAGE_FETCH_TIMEOUT_SECS`: image download timeout (default: `10`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub plant_id_api_key: String,
    pub plant_id_endpoint: String,
    pub plant_id_timeout: Duration,
    pub image_fetch_timeout: Duration,
}

impl Config {
    pub const API_KEY_VAR: &'static str = "PLANT_ID_API_KEY";
    pub const DEFAULT_PORT: u16 = 5000;
    pub const DEFAULT_IMAGE_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// everything except the API key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let plant_id_api_key = lookup(Self::API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingVar(Self::API_KEY_VAR))?;

        let secs = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(Self::DEFAULT_PORT),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            plant_id_endpoint: lookup("PLANT_ID_ENDPOINT")
                .unwrap_or_else(|| ClientConfig::DEFAULT_ENDPOINT.to_string()),
            plant_id_timeout: secs("PLANT_ID_TIMEOUT_SECS", ClientConfig::DEFAULT_TIMEOUT),
            image_fetch_timeout: secs(
                "IMAGE_FETCH_TIMEOUT_SECS",
                Self::DEFAULT_IMAGE_FETCH_TIMEOUT,
            ),
            plant_id_api_key,
        })
    }

    /// Default configuration around the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: Self::DEFAULT_PORT,
            log_level: "info".to_string(),
            plant_id_api_key: api_key.into(),
            plant_id_endpoint: ClientConfig::DEFAULT_ENDPOINT.to_string(),
            plant_id_timeout: ClientConfig::DEFAULT_TIMEOUT,
            image_fetch_timeout: Self::DEFAULT_IMAGE_FETCH_TIMEOUT,
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Provider client settings derived from this configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.plant_id_api_key.clone())
            .with_endpoint(self.plant_id_endpoint.clone())
            .with_timeout(self.plant_id_timeout)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("plant_id_api_key", &"<redacted>")
            .field("plant_id_endpoint", &self.plant_id_endpoint)
            .field("plant_id_timeout", &self.plant_id_timeout)
            .field("image_fetch_timeout", &self.image_fetch_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("PLANT_ID_API_KEY")));
    }

    #[test]
    fn test_blank_api_key_is_fatal() {
        let result = Config::from_lookup(lookup(&[("PLANT_ID_API_KEY", "   ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_values() {
        let config = Config::from_lookup(lookup(&[("PLANT_ID_API_KEY", "k")])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.plant_id_endpoint, "https://api.plant.id/v3/identification");
        assert_eq!(config.plant_id_timeout, Duration::from_secs(30));
        assert_eq!(config.image_fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let config = Config::from_lookup(lookup(&[
            ("PLANT_ID_API_KEY", "k"),
            ("HOST", "127.0.0.1"),
            ("PORT", "not-a-port"),
            ("PLANT_ID_ENDPOINT", "http://localhost:9000/identify"),
            ("PLANT_ID_TIMEOUT_SECS", "5"),
            ("IMAGE_FETCH_TIMEOUT_SECS", "-1"),
        ]))
        .unwrap();

        assert_eq!(config.addr(), "127.0.0.1:5000");
        assert_eq!(config.plant_id_endpoint, "http://localhost:9000/identify");
        assert_eq!(config.plant_id_timeout, Duration::from_secs(5));
        assert_eq!(config.image_fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_client_config_carries_key_and_endpoint() {
        let mut config = Config::with_api_key("secret");
        config.plant_id_endpoint = "http://stub/identify".to_string();

        let client = config.client_config();
        assert_eq!(client.api_key, "secret");
        assert_eq!(client.endpoint, "http://stub/identify");
        assert_eq!(client.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", Config::with_api_key("secret-value"));
        assert!(!rendered.contains("secret-value"));
    }
}
