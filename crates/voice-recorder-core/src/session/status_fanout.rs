use crate::{ElapsedTime, SessionError, StatusPayload, StatusPresenter};

use std::sync::Arc;

use tokio::sync::mpsc;

/// Identifies a subscription so it can be cancelled later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receiving side of [`RecordingSession::subscribe`](crate::RecordingSession::subscribe).
///
/// Yields every [`StatusPayload`] published after the subscription was
/// made, in order. `recv` returns `None` once the subscription is cancelled.
#[derive(Debug)]
pub struct StatusSubscription {
    id: SubscriptionId,
    receiver: mpsc::UnboundedReceiver<StatusPayload>,
}

impl StatusSubscription {
    /// Subscription identifier.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Waits for the next payload.
    pub async fn recv(&mut self) -> Option<StatusPayload> {
        self.receiver.recv().await
    }

    /// Returns the next payload if one is already queued.
    pub fn try_recv(&mut self) -> Option<StatusPayload> {
        self.receiver.try_recv().ok()
    }
}

/// Delivers payloads to the mandatory presenter, then to every subscriber.
pub(crate) struct StatusFanout {
    presenter: Arc<dyn StatusPresenter>,
    subscribers: Vec<(SubscriptionId, mpsc::UnboundedSender<StatusPayload>)>,
    next_id: u64,
}

impl StatusFanout {
    pub(crate) fn new(presenter: Arc<dyn StatusPresenter>) -> Self {
        Self {
            presenter,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn subscribe(&mut self) -> StatusSubscription {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers.push((id, sender));

        StatusSubscription { id, receiver }
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    pub(crate) fn publish(&mut self, payload: &StatusPayload) {
        self.presenter.render(payload);
        // Dropped receivers are pruned here.
        self.subscribers
            .retain(|(_, sender)| sender.send(*payload).is_ok());
    }

    pub(crate) fn finished(&self, elapsed: ElapsedTime) {
        self.presenter.finished(elapsed);
    }

    pub(crate) fn failed(&self, error: &SessionError) {
        self.presenter.failed(error);
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
