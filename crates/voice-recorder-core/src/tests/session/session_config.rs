use crate::{MAX_TICK_INTERVAL, SessionConfig, SessionError};

use std::time::Duration;

/// WHAT: Tick intervals longer than one second are rejected
/// WHY: Coarser ticks would skip seconds on the status surface
#[test]
fn given_interval_over_one_second_when_configuring_then_invalid_config() {
    // Given: A 1.5s interval
    let interval = Duration::from_millis(1_500);

    // When: Building the config
    let result = SessionConfig::new(interval);

    // Then: Rejected
    assert!(matches!(result, Err(SessionError::InvalidConfig { .. })));
}

/// WHAT: A zero interval is rejected
/// WHY: It would spin the tick task
#[test]
fn given_zero_interval_when_configuring_then_invalid_config() {
    let result = SessionConfig::new(Duration::ZERO);

    assert!(matches!(result, Err(SessionError::InvalidConfig { .. })));
}

/// WHAT: The boundary value is accepted
/// WHY: One-second ticks are the default
#[test]
#[allow(clippy::unwrap_used)]
fn given_max_interval_when_configuring_then_accepted() {
    let config = SessionConfig::new(MAX_TICK_INTERVAL).unwrap();

    assert_eq!(config.tick_interval(), MAX_TICK_INTERVAL);
    assert_eq!(config, SessionConfig::default());
}
