use std::fmt;

/// Control command carried on the external command channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Suspend capture.
    Pause,
    /// Continue a paused capture.
    Resume,
    /// End the session.
    Stop,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Stop => "stop",
        };
        f.write_str(name)
    }
}
