use crate::config::default_sample_interval_ms;

use serde::{Deserialize, Serialize};

/// Input level meter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Milliseconds between level samples.
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: default_sample_interval_ms(),
        }
    }
}
