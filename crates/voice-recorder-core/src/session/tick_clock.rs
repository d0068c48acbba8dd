use crate::ElapsedTime;

use std::time::Duration;

use tokio::time::Instant;

/// Accumulates time spent running, excluding every halted interval.
#[derive(Debug, Default)]
pub(crate) struct TickClock {
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl TickClock {
    /// Starts counting from `now`. No-op if already running.
    pub(crate) fn run(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// Stops counting and folds the running interval into the total.
    pub(crate) fn halt(&mut self, now: Instant) -> ElapsedTime {
        if let Some(since) = self.running_since.take() {
            self.accumulated += now.saturating_duration_since(since);
        }
        ElapsedTime::from_duration(self.accumulated)
    }

    pub(crate) fn elapsed_at(&self, now: Instant) -> ElapsedTime {
        let running = self
            .running_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or_default();
        ElapsedTime::from_duration(self.accumulated + running)
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running_since.is_some()
    }
}
