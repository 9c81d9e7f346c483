use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub facts: FactsConfig,
}

/// Timer settings for the number counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Interval between timer ticks in milliseconds (default: 1000).
    #[serde(default = "default_timer_interval_ms")]
    pub timer_interval_ms: u64,
}

/// Number trivia service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactsConfig {
    /// Base URL of the trivia service (default: "http://numberapi.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Artificial delay before each request in milliseconds (default: 3000).
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Total request timeout in seconds (default: 10).
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

fn default_timer_interval_ms() -> u64 {
    1000
}

fn default_base_url() -> String {
    "http://numberapi.com".to_string()
}

fn default_delay_ms() -> u64 {
    3000
}

fn default_request_timeout_seconds() -> u64 {
    10
}

impl ClockConfig {
    pub fn timer_interval(&self) -> Duration {
        Duration::from_millis(self.timer_interval_ms)
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            timer_interval_ms: default_timer_interval_ms(),
        }
    }
}

impl Default for FactsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            delay_ms: default_delay_ms(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}
