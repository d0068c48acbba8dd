use crate::{Command, RecordingState};

/// Why a command left the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The session was already in the requested state.
    AlreadyInState,
    /// The session was Idle or Stopped.
    NotActive,
}

/// Definite result of handling a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The session transitioned.
    Applied {
        /// State after the transition.
        state: RecordingState,
    },
    /// The command was a no-op.
    Ignored {
        /// Unchanged session state.
        state: RecordingState,
        /// Why nothing happened.
        reason: IgnoreReason,
    },
    /// An attached client received the command and will act on it.
    Relayed {
        /// The relayed command.
        command: Command,
    },
}
