//! Interactive console client.
//!
//! Reads commands from stdin. After `attach`, the console becomes the
//! session's interactive client: it prints every status update, and any
//! pause/resume/stop sent from the tray or hotkey is relayed here first and
//! applied by the console itself.

use crate::{AppCommand, AppError, AppResult, CONSOLE_HELP, ConsoleInput};

use std::{panic::Location, sync::Arc};

use error_location::ErrorLocation;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{mpsc, watch},
};
use tracing::{debug, info, instrument, warn};
use voice_recorder_core::{
    Attachment, ClientLink, Command, CommandOutcome, DeliveryRouter, StatusPayload,
};

enum ClientEvent {
    Status(StatusPayload),
    Relayed(Command),
    Closed,
}

struct ConsoleAttachment {
    attachment: Attachment,
    relayed: mpsc::UnboundedReceiver<Command>,
}

impl ConsoleAttachment {
    async fn next_event(&mut self) -> ClientEvent {
        tokio::select! {
            Some(payload) = self.attachment.updates.recv() => ClientEvent::Status(payload),
            Some(command) = self.relayed.recv() => ClientEvent::Relayed(command),
            else => ClientEvent::Closed,
        }
    }
}

async fn next_event(attached: &mut Option<ConsoleAttachment>) -> ClientEvent {
    match attached {
        Some(attachment) => attachment.next_event().await,
        None => std::future::pending().await,
    }
}

fn describe(outcome: &CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Applied { state } => format!("ok, now {}", state),
        CommandOutcome::Ignored { state, reason } => {
            format!("ignored ({:?}), still {}", reason, state)
        }
        CommandOutcome::Relayed { command } => format!("{} sent to attached client", command),
    }
}

/// Stdin-driven client that can attach to the recording session.
pub struct ConsoleClient {
    router: Arc<DeliveryRouter>,
    command_tx: mpsc::Sender<AppCommand>,
    attached: Option<ConsoleAttachment>,
}

impl ConsoleClient {
    /// Creates a detached console client.
    pub fn new(router: Arc<DeliveryRouter>, command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self {
            router,
            command_tx,
            attached: None,
        }
    }

    /// Runs until `quit`, end of input, or shutdown.
    ///
    /// Detaches on exit; the recording itself is left running.
    #[instrument(skip(self))]
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!("{}", CONSOLE_HELP);

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    debug!("Console client shutting down");
                    break;
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        info!("Console input closed");
                        break;
                    };
                    if !self.handle_line(&line).await? {
                        break;
                    }
                }
                event = next_event(&mut self.attached) => {
                    self.handle_event(event);
                }
            }
        }

        if self.attached.take().is_some() {
            self.router.detach();
        }

        Ok(())
    }

    /// Returns `false` when the console should stop reading.
    #[instrument(skip(self))]
    async fn handle_line(&mut self, line: &str) -> AppResult<bool> {
        let Some(input) = ConsoleInput::parse(line) else {
            if !line.trim().is_empty() {
                println!("unknown command: {}", line.trim());
                println!("{}", CONSOLE_HELP);
            }
            return Ok(true);
        };

        match input {
            ConsoleInput::Attach => self.attach(),
            ConsoleInput::Detach => self.detach(),
            ConsoleInput::Start => self.send(AppCommand::StartRecording).await?,
            ConsoleInput::Control(command) => self.control(command).await?,
            ConsoleInput::Status => {
                let status = self.router.query();
                println!(
                    "session {}: recording: {}, paused: {}, elapsed: {} ms",
                    self.router.session().session_id(),
                    status.is_recording,
                    status.is_paused,
                    status.elapsed_millis
                );
            }
            ConsoleInput::Help => println!("{}", CONSOLE_HELP),
            ConsoleInput::Quit => {
                self.send(AppCommand::Shutdown).await?;
                return Ok(false);
            }
        }

        Ok(true)
    }

    pub(crate) fn attach(&mut self) {
        if self.attached.is_some() {
            println!("already attached");
            return;
        }

        let (link, relayed) = ClientLink::channel();
        let attachment = self.router.attach(link);

        match attachment.snapshot.payload() {
            Some(payload) => println!("attached: {} [{}]", payload, payload.action_label()),
            None => println!("attached: {}", attachment.snapshot.state),
        }

        self.attached = Some(ConsoleAttachment {
            attachment,
            relayed,
        });
    }

    fn detach(&mut self) {
        if self.attached.take().is_none() {
            println!("not attached");
            return;
        }

        self.router.detach();
        println!("detached, recording continues");
    }

    /// Attached: the console is the client, so it applies the command to
    /// the session itself. Detached: the command goes through the router.
    pub(crate) async fn control(&self, command: Command) -> AppResult<()> {
        match &self.attached {
            Some(console) => match console.attachment.session().apply(command) {
                Ok(outcome) => println!("{}: {}", command, describe(&outcome)),
                Err(e) => println!("{} failed: {}", command, e),
            },
            None => self.send(AppCommand::Dispatch(command)).await?,
        }

        Ok(())
    }

    fn handle_event(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::Status(payload) => {
                println!("{} [{}]", payload, payload.action_label());
            }
            ClientEvent::Relayed(command) => {
                let Some(console) = &self.attached else {
                    return;
                };
                println!("received {} request", command);
                match console.attachment.session().apply(command) {
                    Ok(outcome) => println!("{}: {}", command, describe(&outcome)),
                    Err(e) => {
                        warn!(%command, error = %e, "Relayed command failed");
                        println!("{} failed: {}", command, e);
                    }
                }
            }
            ClientEvent::Closed => {
                debug!("Attachment channels closed");
                self.attached = None;
            }
        }
    }

    /// The caller location is captured before the returned future runs.
    #[track_caller]
    pub(crate) fn send(&self, command: AppCommand) -> impl Future<Output = AppResult<()>> + '_ {
        let location = ErrorLocation::from(Location::caller());
        async move {
            self.command_tx
                .send(command)
                .await
                .map_err(|e| AppError::ChannelSendFailed {
                    message: format!("Failed to send {:?}: {}", command, e),
                    location,
                })
        }
    }
}
