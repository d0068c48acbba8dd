use crate::{CoreResult, LevelProbe, LevelSampler, Recorder, SessionError};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;

use tokio::{
    runtime::Handle,
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, instrument, trace};

/// Default spacing between level samples.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

/// Level reported for silence.
pub const MIN_DBFS: f32 = -96.0;

/// Converts a linear peak amplitude (1.0 = full scale) to dBFS.
pub fn peak_to_dbfs(peak: f32) -> f32 {
    if peak <= 0.0 || !peak.is_finite() {
        return MIN_DBFS;
    }
    (20.0 * peak.log10()).clamp(MIN_DBFS, 0.0)
}

struct SamplerTask {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Samples a recorder's [`LevelProbe`] on a fixed cadence and publishes the
/// level in dBFS on a `watch` channel.
pub struct PeakLevelSampler {
    interval: Duration,
    levels: watch::Sender<f32>,
    task: Option<SamplerTask>,
}

impl PeakLevelSampler {
    /// Creates an idle sampler.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `interval` is zero.
    #[track_caller]
    pub fn new(interval: Duration) -> CoreResult<Self> {
        if interval.is_zero() {
            return Err(SessionError::InvalidConfig {
                reason: "sample interval must be greater than 0ms".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self::with_valid_interval(interval))
    }

    fn with_valid_interval(interval: Duration) -> Self {
        let (levels, _) = watch::channel(MIN_DBFS);
        Self {
            interval,
            levels,
            task: None,
        }
    }

    /// Receiver for the latest level. Survives restarts of the sampler.
    pub fn levels(&self) -> watch::Receiver<f32> {
        self.levels.subscribe()
    }

    /// True while the sampling task is alive.
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }
}

impl Default for PeakLevelSampler {
    fn default() -> Self {
        Self::with_valid_interval(DEFAULT_SAMPLE_INTERVAL)
    }
}

impl LevelSampler for PeakLevelSampler {
    #[instrument(skip(self, recorder, runtime))]
    fn start(&mut self, recorder: &dyn Recorder, runtime: &Handle) {
        if self.task.is_some() {
            debug!("Level sampler already running");
            return;
        }

        let probe: LevelProbe = recorder.level_probe();
        let levels = self.levels.clone();
        let period = self.interval;
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        // Discard whatever accumulated before this recording.
        let _ = probe.take_peak();

        let handle = runtime.spawn(async move {
            let mut ticks = time::interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticks.tick() => {
                        let dbfs = peak_to_dbfs(probe.take_peak());
                        levels.send_replace(dbfs);
                        trace!(dbfs, "Level sampled");
                    }
                }
            }
        });

        self.task = Some(SamplerTask {
            shutdown_tx,
            handle,
        });
        debug!(interval_ms = period.as_millis(), "Level sampler started");
    }

    #[instrument(skip(self))]
    fn stop(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };

        let _ = task.shutdown_tx.send(true);
        task.handle.abort();
        self.levels.send_replace(MIN_DBFS);

        debug!("Level sampler stopped");
    }
}

impl Drop for PeakLevelSampler {
    fn drop(&mut self) {
        self.stop();
    }
}
