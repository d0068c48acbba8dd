use voice_recorder_core::Command;

/// One line typed into the console client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Bind the console as the interactive client.
    Attach,
    /// Unbind the console.
    Detach,
    /// Start a recording.
    Start,
    /// Pause, resume or stop.
    Control(Command),
    /// Print the current status.
    Status,
    /// Print the command list.
    Help,
    /// Exit the application.
    Quit,
}

impl ConsoleInput {
    /// Parses a console line. Case-insensitive, surrounding whitespace
    /// ignored. Returns `None` for blank or unknown input.
    pub fn parse(line: &str) -> Option<Self> {
        let input = match line.trim().to_ascii_lowercase().as_str() {
            "attach" | "a" => Self::Attach,
            "detach" | "d" => Self::Detach,
            "start" | "record" => Self::Start,
            "pause" | "p" => Self::Control(Command::Pause),
            "resume" | "r" => Self::Control(Command::Resume),
            "stop" | "s" => Self::Control(Command::Stop),
            "status" | "?" => Self::Status,
            "help" | "h" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => return None,
        };
        Some(input)
    }
}

/// Printed for `help` and unknown input.
pub const CONSOLE_HELP: &str =
    "commands: attach, detach, start, pause, resume, stop, status, help, quit";
