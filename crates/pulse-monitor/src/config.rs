//! Application configuration.

use crate::error::{AppError, AppResult};
use pulse_dashboard::ViewConfig;
use pulse_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_snapshot_log_interval_secs() -> u64 {
    15
}

/// Top-level configuration, loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend base URL. Trailing slashes are ignored.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request HTTP timeout (seconds).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// How often the merged snapshot is logged (seconds).
    #[serde(default = "default_snapshot_log_interval_secs")]
    pub snapshot_log_interval_secs: u64,
    /// Feed intervals, signal symbol, and price endpoint path.
    #[serde(default)]
    pub feeds: ViewConfig,
    /// Conclusion engine tuning.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            snapshot_log_interval_secs: default_snapshot_log_interval_secs(),
            feeds: ViewConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file.
    pub fn load() -> AppResult<Self> {
        let config_path =
            std::env::var("PULSE_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}
