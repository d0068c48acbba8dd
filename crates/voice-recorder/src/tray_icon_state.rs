/// Tray icon states corresponding to the recording lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Ready to start recording.
    Idle,
    /// Currently recording audio.
    Recording,
    /// Recording paused.
    Paused,
    /// The capture device could not be used.
    Failed,
}

impl TrayIconState {
    /// Fill colour of the generated icon.
    pub(crate) fn color(self) -> [u8; 4] {
        match self {
            Self::Idle => [0x8a, 0x8a, 0x8a, 0xff],
            Self::Recording => [0xd9, 0x30, 0x25, 0xff],
            Self::Paused => [0xf2, 0xa9, 0x00, 0xff],
            Self::Failed => [0x5a, 0x1e, 0x8c, 0xff],
        }
    }
}
