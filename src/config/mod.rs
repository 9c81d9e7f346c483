//! Configuration management.
//!
//! Loads settings from TOML, falling back to defaults when no file exists.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ClockConfig, Config, FactsConfig};
