use crate::{AppCommand, AppResult, TrayCommand, TrayMenuIds};

use std::sync::Arc;

use tao::event_loop::EventLoopProxy;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};
use tray_icon::menu::MenuEvent;
use voice_recorder_core::{Command, DeliveryRouter, RecordingState, SessionError};

/// Main application state.
///
/// Runs on the async runtime thread. Tray updates travel back to the main
/// thread through `tray_proxy` because `TrayIcon` is `!Send` and must
/// remain on the UI thread. Every control command, whatever its source,
/// goes through the delivery router.
pub struct App {
    pub(crate) router: Arc<DeliveryRouter>,
    pub(crate) tray_proxy: EventLoopProxy<TrayCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
    pub(crate) menu_ids: TrayMenuIds,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Voice Recorder starting");

        // MenuEvent::receiver() is a blocking crossbeam receiver, so a single
        // blocking task forwards its events. It exits on the first send after
        // tray_event_rx is dropped.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                Some(event) = tray_event_rx.recv() => {
                    if !self.handle_tray_event(event) {
                        break;
                    }
                }

                Some(cmd) = self.command_rx.recv() => {
                    if !self.handle_command(cmd) {
                        break;
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        drop(tray_event_rx);

        match tokio::time::timeout(std::time::Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => info!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => info!(
                "Tray event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        self.shutdown();
        info!("Voice Recorder shut down successfully");

        Ok(())
    }

    /// Returns `false` when the app should exit.
    #[instrument(skip(self))]
    fn handle_command(&self, cmd: AppCommand) -> bool {
        match cmd {
            AppCommand::StartRecording => self.start_recording(),
            AppCommand::ToggleRecording => {
                if self.router.session().state().is_active() {
                    self.dispatch(Command::Stop);
                } else {
                    self.start_recording();
                }
            }
            AppCommand::Dispatch(command) => self.dispatch(command),
            AppCommand::Shutdown => {
                info!("Shutdown requested");
                return false;
            }
        }

        true
    }

    /// Returns `false` when the app should exit.
    #[instrument(skip(self))]
    fn handle_tray_event(&self, event: MenuEvent) -> bool {
        let event_id = &event.id;

        if *event_id == self.menu_ids.start {
            self.start_recording();
        } else if *event_id == self.menu_ids.toggle {
            let command = match self.router.session().state() {
                RecordingState::Paused => Command::Resume,
                _ => Command::Pause,
            };
            self.dispatch(command);
        } else if *event_id == self.menu_ids.stop {
            self.dispatch(Command::Stop);
        } else if *event_id == self.menu_ids.exit {
            info!("Exit requested from tray menu");
            return false;
        }

        true
    }

    fn start_recording(&self) {
        match self.router.start() {
            Ok(session_id) => info!(session_id = %session_id, "Recording started"),
            Err(SessionError::AlreadyActive { state, .. }) => {
                warn!(state = %state, "Recording already in progress");
            }
            // Device failures already reached the tray through the presenter.
            Err(e) => error!(error = %e, "Failed to start recording"),
        }
    }

    fn dispatch(&self, command: Command) {
        match self.router.dispatch(command) {
            Ok(outcome) => debug!(%command, ?outcome, "Command handled"),
            Err(e) => error!(%command, error = %e, "Command failed"),
        }
    }

    /// Stops any running recording directly, detaches the client, and
    /// tells the hotkey handler and UI thread to exit.
    fn shutdown(&self) {
        self.router.detach();

        if self.router.session().state().is_active() {
            match self.router.session().stop() {
                Ok(outcome) => info!(?outcome, "Recording stopped for shutdown"),
                Err(e) => error!(error = %e, "Failed to stop recording on shutdown"),
            }
        }

        let _ = self.shutdown_tx.send(true);

        if self.tray_proxy.send_event(TrayCommand::Shutdown).is_err() {
            debug!("Tray event loop already closed");
        }
    }
}
