use crate::{
    ClientLink, Command, CommandOutcome, DeliveryRouter, RecordingState,
    tests::support::{Calls, Harness},
};

use std::time::Duration;

fn router() -> (DeliveryRouter, Harness) {
    let harness = Harness::new();
    (DeliveryRouter::new(harness.session.clone()), harness)
}

/// WHAT: Unattended stop applies directly and finishes the recorder once
/// WHY: With no client alive, the status surface is the only control
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_no_client_when_dispatching_stop_then_session_stopped() {
    // Given: A recording with no client attached
    let (router, harness) = router();
    router.start().unwrap();

    // When: Stop is dispatched
    let outcome = router.dispatch(Command::Stop).unwrap();

    // Then: Applied directly, recorder finished exactly once
    assert_eq!(
        outcome,
        CommandOutcome::Applied {
            state: RecordingState::Stopped
        }
    );
    assert_eq!(harness.session.state(), RecordingState::Stopped);
    assert_eq!(Calls::count(&harness.calls.recorder_finish), 1);
}

/// WHAT: Unattended pause and resume apply directly
/// WHY: Status surface controls must work without a client
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_no_client_when_dispatching_pause_and_resume_then_applied() {
    // Given: A recording with no client attached
    let (router, harness) = router();
    router.start().unwrap();

    // When: Pause then resume are dispatched
    router.dispatch(Command::Pause).unwrap();
    let paused = harness.session.state();
    router.dispatch(Command::Resume).unwrap();

    // Then: Each took effect
    assert_eq!(paused, RecordingState::Paused);
    assert_eq!(harness.session.state(), RecordingState::Recording);
}

/// WHAT: Attached client receives the command instead of the session
/// WHY: The client owns the authoritative UI and decides how to react
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_attached_client_when_dispatching_pause_then_relayed_not_applied() {
    // Given: A recording with a client attached
    let (router, harness) = router();
    router.start().unwrap();
    let (link, mut inbound) = ClientLink::channel();
    let attachment = router.attach(link);

    // When: Pause is dispatched
    let outcome = router.dispatch(Command::Pause).unwrap();

    // Then: Relayed, session still recording
    assert_eq!(
        outcome,
        CommandOutcome::Relayed {
            command: Command::Pause
        }
    );
    assert_eq!(inbound.recv().await, Some(Command::Pause));
    assert_eq!(harness.session.state(), RecordingState::Recording);

    // When: The client applies it itself
    attachment.session().apply(Command::Pause).unwrap();

    // Then: Now paused, and the recorder was paused once
    assert_eq!(harness.session.state(), RecordingState::Paused);
    assert_eq!(Calls::count(&harness.calls.recorder_pause), 1);
}

/// WHAT: Attached stop is relayed and detach does not stop the recording
/// WHY: Detach alone never stops a recording, even with a stop left unanswered
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_relayed_stop_when_client_detaches_then_recording_continues() {
    // Given: A recording with a client attached
    let (router, harness) = router();
    router.start().unwrap();
    let (link, _inbound) = ClientLink::channel();
    let _attachment = router.attach(link);

    // When: Stop is relayed and the client detaches without acting
    router.dispatch(Command::Stop).unwrap();
    let before = harness.session.snapshot();
    assert!(router.detach());

    // Then: Still recording, elapsed untouched, recorder not finished
    assert!(!router.is_attached());
    assert_eq!(harness.session.state(), RecordingState::Recording);
    assert_eq!(harness.session.snapshot().elapsed, before.elapsed);
    assert_eq!(Calls::count(&harness.calls.recorder_finish), 0);
}

/// WHAT: Attach snapshot matches the most recently emitted payload
/// WHY: Late-attaching clients must sync instantly regardless of tick timing
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_recording_in_progress_when_attaching_then_snapshot_matches_last_payload() {
    // Given: A recording that has run for 3.4s
    let (router, harness) = router();
    router.start().unwrap();
    tokio::time::sleep(Duration::from_millis(3_400)).await;

    // When: A client attaches and queries
    let (link, _inbound) = ClientLink::channel();
    let attachment = router.attach(link);
    let status = router.query();

    // Then: Both agree with what the presenter last showed
    let last = harness.presenter.last().unwrap();
    assert_eq!(attachment.snapshot.payload(), Some(last));
    assert_eq!(status.elapsed_millis, last.elapsed().total_millis());
    assert_eq!(status.elapsed_millis, 3_000);
}

/// WHAT: Attached client receives ticks; the presenter keeps receiving them too
/// WHY: The status surface must never miss an update because a client attached
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_attached_client_when_ticking_then_both_observers_updated() {
    // Given: A recording with a client attached
    let (router, harness) = router();
    router.start().unwrap();
    let (link, _inbound) = ClientLink::channel();
    let mut attachment = router.attach(link);

    // When: Two ticks pass
    let first = attachment.updates.recv().await.unwrap();
    let second = attachment.updates.recv().await.unwrap();

    // Then: Client saw them, presenter saw start plus the same ticks
    assert_eq!(first.elapsed().total_millis(), 1_000);
    assert_eq!(second.elapsed().total_millis(), 2_000);
    assert_eq!(harness.presenter.last(), Some(second));
    assert_eq!(harness.presenter.rendered().len(), 3);
}

/// WHAT: A router subscriber receives ticks before, during and after an attachment
/// WHY: Subscribers observe the session regardless of who controls it
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_router_subscriber_when_client_attaches_and_detaches_then_ticks_continue() {
    // Given: A recording with a subscriber registered through the router
    let (router, _harness) = router();
    router.start().unwrap();
    let mut subscriber = router.subscribe();

    // When/Then: Unattended tick arrives
    assert_eq!(subscriber.recv().await.unwrap().elapsed().total_millis(), 1_000);

    // When/Then: A client attaches, the subscriber keeps receiving
    let (link, _inbound) = ClientLink::channel();
    let _attachment = router.attach(link);
    assert_eq!(subscriber.recv().await.unwrap().elapsed().total_millis(), 2_000);

    // When/Then: The client detaches, the subscriber still receives
    router.detach();
    assert_eq!(subscriber.recv().await.unwrap().elapsed().total_millis(), 3_000);
    assert!(!router.is_attached());
}

/// WHAT: Detach ends the client's subscription but not the presenter's updates
/// WHY: The presenter is a mandatory subscriber that can never be removed
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_attached_client_when_detaching_then_only_client_updates_end() {
    // Given: A recording with a client attached
    let (router, harness) = router();
    router.start().unwrap();
    let (link, _inbound) = ClientLink::channel();
    let mut attachment = router.attach(link);

    // When: The client detaches and time passes
    router.detach();
    tokio::time::sleep(Duration::from_millis(2_500)).await;

    // Then: Client stream is closed, presenter kept ticking
    assert_eq!(attachment.updates.recv().await, None);
    assert_eq!(harness.presenter.last().unwrap().elapsed().total_millis(), 2_000);
}

/// WHAT: A vanished client is detached and the command applied directly
/// WHY: Commands must not disappear into a closed channel
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_client_dropped_without_detach_when_dispatching_then_applied_directly() {
    // Given: A client that attached and then went away
    let (router, harness) = router();
    router.start().unwrap();
    let (link, inbound) = ClientLink::channel();
    drop(router.attach(link));
    drop(inbound);

    // When: Pause is dispatched
    let outcome = router.dispatch(Command::Pause).unwrap();

    // Then: Applied, router no longer attached
    assert_eq!(
        outcome,
        CommandOutcome::Applied {
            state: RecordingState::Paused
        }
    );
    assert!(!router.is_attached());
    assert_eq!(harness.session.state(), RecordingState::Paused);
}

/// WHAT: Attaching again replaces the previous client
/// WHY: Only one interactive client is bound at a time
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_attached_client_when_second_client_attaches_then_commands_go_to_second() {
    // Given: Two clients attached in turn
    let (router, _harness) = router();
    router.start().unwrap();
    let (first_link, mut first_inbound) = ClientLink::channel();
    let mut first = router.attach(first_link);
    let (second_link, mut second_inbound) = ClientLink::channel();
    let _second = router.attach(second_link);

    // When: A command is dispatched
    router.dispatch(Command::Stop).unwrap();

    // Then: Only the second client receives it; the first lost its updates
    assert_eq!(second_inbound.recv().await, Some(Command::Stop));
    assert!(first_inbound.try_recv().is_err());
    assert_eq!(first.updates.recv().await, None);
}

/// WHAT: Start after a stopped session begins a fresh one
/// WHY: A fresh start creates a new session rather than failing
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_stopped_session_when_router_starts_then_new_session_recording() {
    // Given: A stopped session
    let (router, harness) = router();
    let first = router.start().unwrap();
    router.dispatch(Command::Stop).unwrap();

    // When: Started again through the router
    let second = router.start().unwrap();

    // Then: New id, recording
    assert_ne!(first, second);
    assert_eq!(harness.session.state(), RecordingState::Recording);
    assert!(router.query().is_recording);
}
