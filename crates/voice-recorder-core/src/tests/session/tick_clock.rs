use crate::session::tick_clock::TickClock;

use std::time::Duration;

use tokio::time::Instant;

/// WHAT: Halted intervals are excluded from the total
/// WHY: Paused time must never be counted as recorded time
#[test]
fn given_run_halt_run_when_measuring_then_only_running_time_counts() {
    // Given: A clock run for 3s, halted for 10s, run for 2s
    let t0 = Instant::now();
    let mut clock = TickClock::default();
    clock.run(t0);
    let at_pause = clock.halt(t0 + Duration::from_secs(3));
    clock.run(t0 + Duration::from_secs(13));

    // When: Reading at t0 + 15s
    let elapsed = clock.elapsed_at(t0 + Duration::from_secs(15));

    // Then: 3s + 2s
    assert_eq!(at_pause.total_millis(), 3_000);
    assert_eq!(elapsed.total_millis(), 5_000);
}

/// WHAT: Running an already running clock keeps the original start
/// WHY: A duplicate resume must not drop the time accrued so far
#[test]
fn given_running_clock_when_run_again_then_start_preserved() {
    // Given: A clock started at t0
    let t0 = Instant::now();
    let mut clock = TickClock::default();
    clock.run(t0);

    // When: Run is called again 4s later
    clock.run(t0 + Duration::from_secs(4));

    // Then: Time is still measured from t0
    assert_eq!(clock.elapsed_at(t0 + Duration::from_secs(5)).total_millis(), 5_000);
    assert!(clock.is_running());
}
