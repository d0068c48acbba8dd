use crate::{
    Attachment, ClientLink, Command, CommandOutcome, CoreResult, RecordingSession, SessionStatus,
    StatusSubscription, SubscriptionId,
};

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

struct AttachedClient {
    link: ClientLink,
    subscription: SubscriptionId,
}

/// Routes external commands to the session or to an attached client.
///
/// With no client attached, commands take effect immediately. With a client
/// attached, they are relayed to it and the client decides what to apply.
/// Attaching and detaching never change the recording itself.
pub struct DeliveryRouter {
    session: RecordingSession,
    attached: Mutex<Option<AttachedClient>>,
}

impl DeliveryRouter {
    /// Creates an unattended router for `session`.
    pub fn new(session: RecordingSession) -> Self {
        Self {
            session,
            attached: Mutex::new(None),
        }
    }

    /// The routed session.
    pub fn session(&self) -> &RecordingSession {
        &self.session
    }

    /// Starts a recording, renewing the session first if the previous one
    /// has stopped.
    ///
    /// # Errors
    ///
    /// - `AlreadyActive` while a recording is running or paused.
    /// - `ResourceUnavailable` if the recorder cannot start.
    #[instrument(skip(self))]
    pub fn start(&self) -> CoreResult<Uuid> {
        self.session.renew()?;
        self.session.start()
    }

    /// Whether an interactive client is attached.
    pub fn is_attached(&self) -> bool {
        self.lock().is_some()
    }

    /// Attaches an interactive client, replacing any previous one.
    ///
    /// Subsequent commands are relayed to `client`. The returned attachment
    /// carries a snapshot for immediate sync and a live status subscription.
    #[instrument(skip(self, client))]
    pub fn attach(&self, client: ClientLink) -> Attachment {
        let mut attached = self.lock();

        if let Some(previous) = attached.take() {
            self.session.unsubscribe(previous.subscription);
            debug!("Previous client replaced");
        }

        let (updates, snapshot) = self.session.subscribe_with_snapshot();
        *attached = Some(AttachedClient {
            link: client,
            subscription: updates.id(),
        });

        info!(
            session_id = %snapshot.session_id,
            state = %snapshot.state,
            elapsed = %snapshot.elapsed,
            "Client attached"
        );

        Attachment::new(snapshot, updates, self.session.clone())
    }

    /// Detaches the current client. Returns `false` if none was attached.
    ///
    /// Never stops the recording, even if a relayed stop was left unanswered.
    #[instrument(skip(self))]
    pub fn detach(&self) -> bool {
        let Some(client) = self.lock().take() else {
            debug!("Detach without attached client");
            return false;
        };

        self.session.unsubscribe(client.subscription);
        info!(state = %self.session.state(), "Client detached");

        true
    }

    /// Single entry point for external commands.
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` if a directly applied command hits a
    /// recorder failure.
    #[instrument(skip(self))]
    pub fn dispatch(&self, command: Command) -> CoreResult<CommandOutcome> {
        {
            let mut attached = self.lock();
            if let Some(client) = attached.as_ref() {
                if client.link.relay(command) {
                    debug!(%command, "Command relayed to client");
                    return Ok(CommandOutcome::Relayed { command });
                }

                warn!(%command, "Attached client is gone, detaching and applying directly");
                if let Some(stale) = attached.take() {
                    self.session.unsubscribe(stale.subscription);
                }
            }
        }

        let outcome = self.session.apply(command)?;
        debug!(%command, ?outcome, "Command applied");

        Ok(outcome)
    }

    /// Registers a consumer for every status payload.
    pub fn subscribe(&self) -> StatusSubscription {
        self.session.subscribe()
    }

    /// Current recording flags and elapsed time.
    pub fn query(&self) -> SessionStatus {
        self.session.query()
    }

    fn lock(&self) -> MutexGuard<'_, Option<AttachedClient>> {
        self.attached.lock().unwrap_or_else(|e| {
            error!("Attachment lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }
}
