use crate::config::default_location_enabled;

use serde::{Deserialize, Serialize};

/// Location permission configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Whether location access is granted at startup.
    #[serde(default = "default_location_enabled")]
    pub enabled: bool,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            enabled: default_location_enabled(),
        }
    }
}
