//! Voice Recorder Core Library
//!
//! Session lifecycle for a long-running audio recording that outlives its
//! foreground interface: a pause/resume/stop state machine, an elapsed-time
//! ticker feeding a mandatory status surface, and a router that relays
//! commands to an interactive client while one is attached.
//!
//! # Example
//!
//! ```no_run
//! use voice_recorder_core::{
//!     Command, CoreResult, DeliveryRouter, PeakLevelSampler, Recorder, RecordingSession,
//!     SessionConfig, StatusPayload, StatusPresenter,
//! };
//!
//! use std::sync::Arc;
//!
//! struct Log;
//!
//! impl StatusPresenter for Log {
//!     fn render(&self, payload: &StatusPayload) {
//!         println!("{payload} [{}]", payload.action_label());
//!     }
//! }
//!
//! async fn run(recorder: Box<dyn Recorder>) -> CoreResult<()> {
//!     let session = RecordingSession::new(
//!         recorder,
//!         Box::new(PeakLevelSampler::default()),
//!         Arc::new(Log),
//!         SessionConfig::default(),
//!     )?;
//!     let router = DeliveryRouter::new(session);
//!
//!     router.start()?;
//!     tokio::time::sleep(std::time::Duration::from_secs(3)).await;
//!     router.dispatch(Command::Stop)?;
//!     Ok(())
//! }
//! ```

mod capability;
mod delivery;
mod error;
mod level;
mod session;

pub use {
    capability::{LevelProbe, LevelSampler, Recorder, StatusPresenter},
    delivery::{Attachment, ClientLink, Command, CommandOutcome, DeliveryRouter, IgnoreReason},
    error::{Result as CoreResult, SessionError},
    level::{DEFAULT_SAMPLE_INTERVAL, MIN_DBFS, PeakLevelSampler, peak_to_dbfs},
    session::{
        ActionLabel, DEFAULT_TICK_INTERVAL, ElapsedTime, MAX_TICK_INTERVAL, RecordingSession,
        RecordingState, SessionConfig, SessionSnapshot, SessionStatus, StatusPayload,
        StatusSubscription, SubscriptionId,
    },
};

#[cfg(test)]
mod tests;
