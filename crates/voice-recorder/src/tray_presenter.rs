//! Status surface backed by the system tray.

use crate::{TrayCommand, TrayStatus};

use std::sync::Mutex;

use tao::event_loop::EventLoopProxy;
use tokio::sync::watch;
use tracing::{debug, error, warn};
use voice_recorder_core::{ElapsedTime, SessionError, StatusPayload, StatusPresenter};

/// Forwards every status payload to the UI thread as a [`TrayCommand`].
///
/// Called from the tick task; it only formats and posts an event, the
/// actual icon update happens on the main thread.
pub struct TrayPresenter {
    proxy: Mutex<EventLoopProxy<TrayCommand>>,
    levels: watch::Receiver<f32>,
}

impl TrayPresenter {
    /// Creates a presenter posting to `proxy`, annotating with `levels`.
    pub fn new(proxy: EventLoopProxy<TrayCommand>, levels: watch::Receiver<f32>) -> Self {
        Self {
            proxy: Mutex::new(proxy),
            levels,
        }
    }

    fn post(&self, status: TrayStatus) {
        let proxy = self.proxy.lock().unwrap_or_else(|e| {
            error!("Tray proxy lock poisoned, recovering: {}", e);
            e.into_inner()
        });

        if proxy.send_event(TrayCommand::Update(status)).is_err() {
            debug!("Tray event loop closed, status dropped");
        }
    }
}

impl StatusPresenter for TrayPresenter {
    fn render(&self, payload: &StatusPayload) {
        let level = *self.levels.borrow();
        self.post(TrayStatus::from_payload(payload, level));
    }

    fn finished(&self, elapsed: ElapsedTime) {
        self.post(TrayStatus::finished(elapsed));
    }

    fn failed(&self, error: &SessionError) {
        warn!(error = %error, "Showing recording failure in tray");
        let reason = match error {
            SessionError::ResourceUnavailable { reason, .. } => reason.clone(),
            other => other.to_string(),
        };
        self.post(TrayStatus::failed(&reason));
    }
}
