use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::metrics::monitor::{
    DEFAULT_MAX_REQUEST_SAMPLES, DEFAULT_MAX_SYSTEM_SAMPLES, DEFAULT_WINDOW_MS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// HS256 signing secret; the `JWT_SECRET` env var overrides it.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    #[serde(default)]
    pub monitor: MonitorSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    #[serde(default = "default_max_request_samples")]
    pub max_request_samples: usize,

    #[serde(default = "default_max_system_samples")]
    pub max_system_samples: usize,

    /// Window applied when a report request does not specify one.
    #[serde(default = "default_window_ms")]
    pub default_window_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            jwt_secret: default_jwt_secret(),
            monitor: MonitorSection::default(),
        }
    }
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            max_request_samples: default_max_request_samples(),
            max_system_samples: default_max_system_samples(),
            default_window_ms: default_window_ms(),
        }
    }
}

impl AppConfig {
    /// Load from a YAML file, or fall back to defaults when no path is
    /// given. `JWT_SECRET` from the environment wins over both.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => serde_yaml::from_str(&fs::read_to_string(p)?)?,
            None => Self::default(),
        };
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            if !secret.is_empty() {
                config.jwt_secret = secret;
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listen.is_empty() {
            return Err(ConfigError::Invalid("listen must not be empty".into()));
        }
        if self.monitor.max_request_samples == 0 {
            return Err(ConfigError::Invalid(
                "monitor.max_request_samples must be positive".into(),
            ));
        }
        if self.monitor.max_system_samples == 0 {
            return Err(ConfigError::Invalid(
                "monitor.max_system_samples must be positive".into(),
            ));
        }
        if self.monitor.default_window_ms == 0 {
            return Err(ConfigError::Invalid(
                "monitor.default_window_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}
fn default_jwt_secret() -> String {
    "fallback-secret".into()
}
fn default_max_request_samples() -> usize {
    DEFAULT_MAX_REQUEST_SAMPLES
}
fn default_max_system_samples() -> usize {
    DEFAULT_MAX_SYSTEM_SAMPLES
}
fn default_window_ms() -> u64 {
    DEFAULT_WINDOW_MS
}
