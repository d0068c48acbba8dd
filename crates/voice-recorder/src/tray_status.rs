use crate::TrayIconState;

use voice_recorder_core::{ActionLabel, ElapsedTime, MIN_DBFS, StatusPayload};

/// Everything the tray needs to draw one frame of the status surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TrayStatus {
    /// Icon to show.
    pub icon: TrayIconState,
    /// Tooltip text.
    pub tooltip: String,
    /// Label of the pause/resume menu item, `None` when it is disabled.
    pub action: Option<ActionLabel>,
}

impl TrayStatus {
    /// Nothing recording.
    pub fn idle() -> Self {
        Self {
            icon: TrayIconState::Idle,
            tooltip: "Voice Recorder - Ready".to_string(),
            action: None,
        }
    }

    /// Progress of a running or paused recording, with the latest input
    /// level in dBFS.
    pub fn from_payload(payload: &StatusPayload, level_dbfs: f32) -> Self {
        let icon = if payload.is_paused() {
            TrayIconState::Paused
        } else {
            TrayIconState::Recording
        };

        let tooltip = if payload.is_paused() {
            format!("Voice Recorder - Paused {}", payload.elapsed())
        } else {
            format!(
                "Voice Recorder - Recording {} ({:.0} dBFS)",
                payload.elapsed(),
                level_dbfs.max(MIN_DBFS)
            )
        };

        Self {
            icon,
            tooltip,
            action: Some(payload.action_label()),
        }
    }

    /// Recording ended normally.
    pub fn finished(elapsed: ElapsedTime) -> Self {
        Self {
            tooltip: format!("Voice Recorder - Stopped at {}", elapsed),
            ..Self::idle()
        }
    }

    /// Recording ended because the device failed.
    pub fn failed(reason: &str) -> Self {
        Self {
            icon: TrayIconState::Failed,
            tooltip: format!("Voice Recorder - Failed: {}", reason),
            action: None,
        }
    }
}
