use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/newtca/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("newtca").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise behaves like [`Config::load_from`].
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads, parses and validates an explicit config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The timer interval is non-zero
    /// - The fact service base URL is not empty
    /// - The request timeout is non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock.timer_interval_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "clock.timer_interval_ms must be greater than zero".to_string(),
            });
        }

        if self.facts.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "facts.base_url must not be empty".to_string(),
            });
        }

        if self.facts.request_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "facts.request_timeout_seconds must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
