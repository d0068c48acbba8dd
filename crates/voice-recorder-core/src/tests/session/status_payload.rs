use crate::{ActionLabel, ElapsedTime, StatusPayload};

/// WHAT: The action label is always the inverse of the pause state
/// WHY: A paused surface offering "Pause" would be a dead button
#[test]
fn given_either_pause_state_when_building_payload_then_label_offers_other_action() {
    // Given: The same elapsed time
    let elapsed = ElapsedTime::from_millis(5_000);

    // When: Building running and paused payloads
    let running = StatusPayload::new(elapsed, false);
    let paused = StatusPayload::new(elapsed, true);

    // Then: Running offers Pause, paused offers Resume
    assert_eq!(running.action_label(), ActionLabel::Pause);
    assert_eq!(paused.action_label(), ActionLabel::Resume);
    assert_eq!(running.to_string(), "Recording 00:00:05");
    assert_eq!(paused.to_string(), "Paused 00:00:05");
}
