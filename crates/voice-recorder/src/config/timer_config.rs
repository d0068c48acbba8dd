use crate::config::default_tick_interval_ms;

use serde::{Deserialize, Serialize};

/// Elapsed-time ticker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Milliseconds between status updates while recording (1..=1000).
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}
