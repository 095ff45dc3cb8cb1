//! Client configuration
//!
//! Loaded from a TOML file, every field overridable through `DEMODAY_*`
//! environment variables (the container/dev workflow). Missing file means
//! all defaults.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Default REST API base.
pub const DEFAULT_API_URL: &str = "https://api.demoday.app/v1/";
/// Default identity provider base.
pub const DEFAULT_IDENTITY_URL: &str = "https://id.demoday.app/v1/";
/// Default object storage base.
pub const DEFAULT_STORAGE_URL: &str = "https://storage.demoday.app/";
/// Default realtime database HTTP base.
pub const DEFAULT_REALTIME_HTTP_URL: &str = "https://rt.demoday.app/";
/// Default realtime database WebSocket endpoint.
pub const DEFAULT_REALTIME_WS_URL: &str = "wss://rt.demoday.app/subscribe";
/// Default tracing filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Endpoint and logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_url: String,
    pub identity_url: String,
    pub storage_url: String,
    pub realtime_http_url: String,
    pub realtime_ws_url: String,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
            storage_url: DEFAULT_STORAGE_URL.to_string(),
            realtime_http_url: DEFAULT_REALTIME_HTTP_URL.to_string(),
            realtime_ws_url: DEFAULT_REALTIME_WS_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load from `path` (defaults when absent), then apply environment
    /// overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            toml::from_str(&std::fs::read_to_string(path)?)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        let overrides = [
            ("DEMODAY_API_URL", &mut self.api_url),
            ("DEMODAY_IDENTITY_URL", &mut self.identity_url),
            ("DEMODAY_STORAGE_URL", &mut self.storage_url),
            ("DEMODAY_REALTIME_HTTP_URL", &mut self.realtime_http_url),
            ("DEMODAY_REALTIME_WS_URL", &mut self.realtime_ws_url),
            ("DEMODAY_LOG_LEVEL", &mut self.log_level),
        ];
        for (var, slot) in overrides {
            if let Ok(value) = std::env::var(var) {
                if !value.is_empty() {
                    *slot = value;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = ClientConfig::load(Path::new("/nonexistent/demoday.toml")).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demoday.toml");
        std::fs::write(&path, "api_url = \"http://localhost:8080/v1/\"\n").unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.api_url, "http://localhost:8080/v1/");
        assert_eq!(config.identity_url, DEFAULT_IDENTITY_URL);
    }
}
