use voice_recorder_core::Command;

/// Commands sent from the hotkey handler and tray to the main application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Start a new recording session.
    StartRecording,
    /// Start if idle, stop if recording or paused.
    ToggleRecording,
    /// Route a control command through the delivery router.
    Dispatch(Command),
    /// Request application shutdown.
    Shutdown,
}
