mod peak_level_sampler;

pub use peak_level_sampler::{DEFAULT_SAMPLE_INTERVAL, MIN_DBFS, PeakLevelSampler, peak_to_dbfs};
