use std::time::Duration;

use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::trace;

/// Periodic tick task for one Recording interval.
///
/// The callback runs once per period, first one period after spawn, until
/// it returns `false` or the ticker is cancelled.
pub(crate) struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    pub(crate) fn spawn<F>(runtime: &Handle, generation: u64, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let _guard = runtime.enter();
        let first = Instant::now() + period;

        let handle = runtime.spawn(async move {
            let mut interval = time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if !on_tick() {
                    break;
                }
            }

            trace!(generation, "Ticker finished");
        });

        Self { generation, handle }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn cancel(self) {
        self.handle.abort();
    }
}
