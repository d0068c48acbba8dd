use crate::{Command, RecordingSession, SessionSnapshot, StatusSubscription};

use tokio::sync::mpsc;

/// Inbound command channel of an interactive client.
#[derive(Debug, Clone)]
pub struct ClientLink {
    commands: mpsc::UnboundedSender<Command>,
}

impl ClientLink {
    /// Creates a link together with the receiver the client reads from.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Command>) {
        let (commands, receiver) = mpsc::unbounded_channel();
        (Self { commands }, receiver)
    }

    /// Pushes a command to the client. Returns `false` if the client is gone.
    pub(crate) fn relay(&self, command: Command) -> bool {
        self.commands.send(command).is_ok()
    }
}

/// Handed to a client on attach.
///
/// `snapshot` reflects the most recently emitted payload; `updates` starts
/// right after it, so the client misses nothing in between. The
/// subscription ends when the client detaches.
#[derive(Debug)]
pub struct Attachment {
    /// State and elapsed time at the moment of attaching.
    pub snapshot: SessionSnapshot,
    /// Every payload emitted after `snapshot`.
    pub updates: StatusSubscription,
    session: RecordingSession,
}

impl Attachment {
    pub(crate) fn new(
        snapshot: SessionSnapshot,
        updates: StatusSubscription,
        session: RecordingSession,
    ) -> Self {
        Self {
            snapshot,
            updates,
            session,
        }
    }

    /// The session, for the client to apply commands it decides to honour.
    pub fn session(&self) -> &RecordingSession {
        &self.session
    }
}
