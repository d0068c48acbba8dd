use crate::Recorder;

use tokio::runtime::Handle;

/// Amplitude sampling loop bracketed by the recorder's active lifetime.
///
/// The session calls `start` right after `Recorder::start` succeeds and
/// `stop` right after `Recorder::finish`. Sampling is fire-and-forget:
/// nothing in the session depends on it.
pub trait LevelSampler: Send {
    /// Begins sampling the recorder's level probe on `runtime`.
    fn start(&mut self, recorder: &dyn Recorder, runtime: &Handle);

    /// Stops sampling. Must be idempotent.
    fn stop(&mut self);
}
