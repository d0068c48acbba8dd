use crate::{CoreResult, SessionError};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;

/// Default spacing between elapsed-time ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Longest tick spacing that still keeps the seconds display correct.
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Tunables for a [`RecordingSession`](crate::RecordingSession).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    tick_interval: Duration,
}

impl SessionConfig {
    /// Validates and builds a configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `tick_interval` is zero or longer than
    /// [`MAX_TICK_INTERVAL`].
    #[track_caller]
    pub fn new(tick_interval: Duration) -> CoreResult<Self> {
        if tick_interval.is_zero() || tick_interval > MAX_TICK_INTERVAL {
            return Err(SessionError::InvalidConfig {
                reason: format!(
                    "tick interval must be within (0, {}ms], got {}ms",
                    MAX_TICK_INTERVAL.as_millis(),
                    tick_interval.as_millis()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self { tick_interval })
    }

    /// Spacing between ticks while recording.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}
