use std::fmt;

/// Lifecycle state of a recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordingState {
    /// Created, nothing captured yet.
    #[default]
    Idle,
    /// Capturing audio; ticks are produced.
    Recording,
    /// Capture suspended; elapsed time is frozen.
    Paused,
    /// Finished. Recorder and sampler have been released.
    Stopped,
}

impl RecordingState {
    /// True while the recorder holds the capture resource.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Recording | Self::Paused)
    }
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
