#[allow(clippy::module_inception)]
mod config;
mod location_config;
mod recorder_config;

pub(crate) use {
    config::Config, location_config::LocationConfig, recorder_config::RecorderConfig,
};

pub(crate) const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 1000;
pub(crate) const DEFAULT_LOCATION_ENABLED: bool = true;

pub(crate) fn default_sample_interval_ms() -> u64 {
    DEFAULT_SAMPLE_INTERVAL_MS
}

pub(crate) fn default_location_enabled() -> bool {
    DEFAULT_LOCATION_ENABLED
}
