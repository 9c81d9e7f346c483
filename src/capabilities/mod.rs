//! Injected collaborators that effects call into.
//!
//! Reducers never touch these directly; they capture an [`Environment`] and
//! hand its capabilities to the effects they return.

mod clock;
mod fact;

use std::sync::Arc;
use std::time::Duration;

pub use clock::{next_tick, Clock, ManualClock, Ticks, TokioClock};
pub use fact::{FactClient, FactError, HttpFactClient, OfflineFactClient};

use crate::config::Config;

/// Capabilities shared by every feature reducer.
#[derive(Clone)]
pub struct Environment {
    pub facts: Arc<dyn FactClient>,
    pub clock: Arc<dyn Clock>,
    pub timer_interval: Duration,
}

impl Environment {
    pub fn new(facts: Arc<dyn FactClient>, clock: Arc<dyn Clock>, timer_interval: Duration) -> Self {
        Self {
            facts,
            clock,
            timer_interval,
        }
    }

    /// Network-backed facts and the wall clock.
    pub fn live(config: &Config) -> Result<Self, FactError> {
        Ok(Self::new(
            Arc::new(HttpFactClient::new(&config.facts)?),
            Arc::new(TokioClock),
            config.clock.timer_interval(),
        ))
    }

    /// Canned facts and the wall clock.
    pub fn offline(config: &Config) -> Self {
        Self::new(
            Arc::new(OfflineFactClient),
            Arc::new(TokioClock),
            config.clock.timer_interval(),
        )
    }
}
