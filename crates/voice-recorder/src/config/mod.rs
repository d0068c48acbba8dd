mod audio_config;
#[allow(clippy::module_inception)]
mod config;
mod level_config;
mod timer_config;

pub(crate) use {
    audio_config::AudioConfig, config::Config, level_config::LevelConfig,
    timer_config::TimerConfig,
};

pub(crate) const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;
pub(crate) const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 100;

pub(crate) fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

pub(crate) fn default_sample_interval_ms() -> u64 {
    DEFAULT_SAMPLE_INTERVAL_MS
}
