use crate::{ElapsedTime, RecordingState, StatusPayload};

use uuid::Uuid;

/// Point-in-time view of a session, used to sync late-attaching clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Session identifier.
    pub session_id: Uuid,
    /// Current lifecycle state.
    pub state: RecordingState,
    /// Elapsed time of the most recently emitted payload.
    pub elapsed: ElapsedTime,
}

impl SessionSnapshot {
    /// The payload the status surface is currently showing, if any.
    pub fn payload(&self) -> Option<StatusPayload> {
        match self.state {
            RecordingState::Recording => Some(StatusPayload::new(self.elapsed, false)),
            RecordingState::Paused => Some(StatusPayload::new(self.elapsed, true)),
            RecordingState::Idle | RecordingState::Stopped => None,
        }
    }
}

/// Answer to a status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStatus {
    /// Recorder holds the capture resource (Recording or Paused).
    pub is_recording: bool,
    /// Recording is paused.
    pub is_paused: bool,
    /// Elapsed milliseconds of the most recently emitted payload.
    pub elapsed_millis: u64,
}
