use crate::ElapsedTime;

use std::fmt;

/// The control offered on the status surface.
///
/// Always the inverse of the current state: a running recording offers
/// `Pause`, a paused one offers `Resume`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionLabel {
    /// Recording is running and can be paused.
    Pause,
    /// Recording is paused and can be resumed.
    Resume,
}

impl ActionLabel {
    /// The action available for the given pause state.
    pub const fn for_paused(is_paused: bool) -> Self {
        if is_paused { Self::Resume } else { Self::Pause }
    }

    /// Human-readable label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pause => "Pause",
            Self::Resume => "Resume",
        }
    }
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot pushed to the status surface on every tick and pause/resume.
///
/// The action label is derived from `is_paused` at construction, so a
/// payload can never pair `is_paused = true` with [`ActionLabel::Pause`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusPayload {
    elapsed: ElapsedTime,
    is_paused: bool,
    action_label: ActionLabel,
}

impl StatusPayload {
    /// Builds a payload for the given elapsed time and pause state.
    pub const fn new(elapsed: ElapsedTime, is_paused: bool) -> Self {
        Self {
            elapsed,
            is_paused,
            action_label: ActionLabel::for_paused(is_paused),
        }
    }

    /// Elapsed recording time.
    pub const fn elapsed(&self) -> ElapsedTime {
        self.elapsed
    }

    /// Whether the recording is paused.
    pub const fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Action the status surface should offer.
    pub const fn action_label(&self) -> ActionLabel {
        self.action_label
    }
}

impl fmt::Display for StatusPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.is_paused { "Paused" } else { "Recording" };
        write!(f, "{verb} {}", self.elapsed)
    }
}
