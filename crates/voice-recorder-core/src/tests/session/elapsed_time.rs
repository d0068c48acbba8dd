use crate::ElapsedTime;

use std::time::Duration;

/// WHAT: Clock-face fields are derived by division and modulo
/// WHY: The status surface shows HH:MM:SS straight from these accessors
#[test]
fn given_mixed_duration_when_splitting_then_fields_wrap_correctly() {
    // Given: 2h 03m 04s 567ms
    let elapsed = ElapsedTime::from_millis(2 * 3_600_000 + 3 * 60_000 + 4_000 + 567);

    // When/Then: Each field carries only its own unit
    assert_eq!(elapsed.hours(), 2);
    assert_eq!(elapsed.minutes(), 3);
    assert_eq!(elapsed.seconds(), 4);
    assert_eq!(elapsed.to_string(), "02:03:04");
}

/// WHAT: Sub-second remainders never round up the seconds display
/// WHY: A 999ms recording must not already read 00:00:01
#[test]
fn given_just_under_a_second_when_displaying_then_zero_seconds() {
    // Given: 999ms elapsed
    let elapsed = ElapsedTime::from_millis(999);

    // When: Formatting for display
    let shown = elapsed.to_string();

    // Then: Still zero
    assert_eq!(shown, "00:00:00");
}

/// WHAT: Hours keep counting past 99
/// WHY: Long unattended recordings must not wrap back to zero
#[test]
fn given_more_than_99_hours_when_displaying_then_hours_not_truncated() {
    // Given: 100 hours
    let elapsed = ElapsedTime::from_duration(Duration::from_secs(100 * 3600));

    // When/Then: All digits shown
    assert_eq!(elapsed.to_string(), "100:00:00");
}
