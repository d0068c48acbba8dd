use std::{fmt, time::Duration};

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;

/// Time spent in the Recording state, with clock-face accessors.
///
/// Displays as `HH:MM:SS`. Hours are not wrapped, so a 100 hour recording
/// renders as `100:00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ElapsedTime {
    total_millis: u64,
}

impl ElapsedTime {
    /// Nothing recorded yet.
    pub const ZERO: Self = Self { total_millis: 0 };

    /// Elapsed time from a millisecond count.
    pub const fn from_millis(total_millis: u64) -> Self {
        Self { total_millis }
    }

    /// Elapsed time from a duration, saturating at `u64::MAX` milliseconds.
    pub fn from_duration(duration: Duration) -> Self {
        Self {
            total_millis: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Total milliseconds.
    pub const fn total_millis(&self) -> u64 {
        self.total_millis
    }

    /// Whole hours.
    pub const fn hours(&self) -> u64 {
        self.total_millis / MILLIS_PER_HOUR
    }

    /// Minutes within the current hour.
    pub const fn minutes(&self) -> u64 {
        (self.total_millis / MILLIS_PER_MINUTE) % 60
    }

    /// Seconds within the current minute.
    pub const fn seconds(&self) -> u64 {
        (self.total_millis / MILLIS_PER_SECOND) % 60
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}
