mod elapsed_time;
mod recording_session;
mod recording_state;
mod session_config;
mod session_snapshot;
mod status_fanout;
mod status_payload;
pub(crate) mod tick_clock;
pub(crate) mod ticker;

pub use {
    elapsed_time::ElapsedTime,
    recording_session::RecordingSession,
    recording_state::RecordingState,
    session_config::{DEFAULT_TICK_INTERVAL, MAX_TICK_INTERVAL, SessionConfig},
    session_snapshot::{SessionSnapshot, SessionStatus},
    status_fanout::{StatusSubscription, SubscriptionId},
    status_payload::{ActionLabel, StatusPayload},
};
