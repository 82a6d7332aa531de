use crate::config::default_sample_interval_ms;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Simulated recorder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Milliseconds between simulated location samples.
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
}

impl RecorderConfig {
    /// Sampling period as a `Duration`.
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: default_sample_interval_ms(),
        }
    }
}
