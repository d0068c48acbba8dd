use crate::{CoreResult, LevelProbe};

/// Owns the capture resource for one recording.
///
/// Called with the session lock held, so implementations must not block
/// for long and must never call back into the session.
pub trait Recorder: Send {
    /// Acquires the capture device and begins capturing.
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` if the device cannot be acquired.
    fn start(&mut self) -> CoreResult<()>;

    /// Suspends capture without releasing the device.
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` if the device was lost.
    fn pause(&mut self) -> CoreResult<()>;

    /// Continues a paused capture.
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` if the device was lost.
    fn resume(&mut self) -> CoreResult<()>;

    /// Ends capture and releases the device.
    ///
    /// # Errors
    ///
    /// Returns an error if the recording could not be finalised. The
    /// session treats this as non-fatal; the device is considered released.
    fn finish(&mut self) -> CoreResult<()>;

    /// True between a successful `start` and `finish`.
    fn is_recording(&self) -> bool;

    /// True while paused.
    fn is_paused(&self) -> bool;

    /// Shared cell the capture path writes peak amplitudes into.
    fn level_probe(&self) -> LevelProbe;
}
