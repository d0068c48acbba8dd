use crate::RecordingState;

use error_location::ErrorLocation;
use thiserror::Error;

/// Recording session errors with source location tracking.
#[derive(Error, Debug)]
pub enum SessionError {
    /// `start` was called on a session that is not Idle.
    #[error("Recording session already active (state: {state}) {location}")]
    AlreadyActive {
        /// State the session was in when the start was rejected.
        state: RecordingState,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A control command reached a session that is Idle or Stopped.
    ///
    /// Never surfaced to callers: command handlers absorb it into
    /// [`CommandOutcome::Ignored`](crate::CommandOutcome::Ignored).
    #[error("No active recording (state: {state}) {location}")]
    NotActive {
        /// State the session was in when the command arrived.
        state: RecordingState,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The recorder could not acquire or drive the capture device.
    #[error("Recording resource unavailable: {reason} {location}")]
    ResourceUnavailable {
        /// Description of the device failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Session configuration rejected.
    #[error("Invalid session configuration: {reason} {location}")]
    InvalidConfig {
        /// Description of the invalid setting.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No tokio runtime was available to host the timer task.
    #[error("Async runtime unavailable: {reason} {location}")]
    RuntimeUnavailable {
        /// Description from the runtime lookup.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`SessionError`].
pub type Result<T> = std::result::Result<T, SessionError>;
