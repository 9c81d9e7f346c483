use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError};

/// Drive the demo features from the command line.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "newtca", version, about)]
pub struct Args {
    /// Config file to load instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the counter timer interval.
    #[arg(long, value_name = "MS")]
    pub timer_interval_ms: Option<u64>,

    /// Override the number fact service base URL.
    #[arg(long, value_name = "URL")]
    pub fact_base_url: Option<String>,

    /// Override the artificial delay before each fact request.
    #[arg(long, value_name = "MS")]
    pub fact_delay_ms: Option<u64>,

    /// Answer fact requests locally instead of calling the service.
    #[arg(long)]
    pub offline: bool,
}

impl Args {
    /// Load the configuration these arguments point at, with overrides applied.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&self, config: &mut Config) {
        if let Some(interval) = self.timer_interval_ms {
            config.clock.timer_interval_ms = interval;
        }
        if let Some(url) = &self.fact_base_url {
            config.facts.base_url = url.clone();
        }
        if let Some(delay) = self.fact_delay_ms {
            config.facts.delay_ms = delay;
        }
    }
}
