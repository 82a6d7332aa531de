use crate::{RecordingError, RecordingState, ToggleOutcome, tests::recording::support::Harness};

fn harness_awaiting_confirmation() -> Harness {
    let harness = Harness::new();
    harness.manager.toggle();
    harness.recorder.add_samples(40);
    assert_eq!(
        harness.manager.toggle(),
        ToggleOutcome::AwaitingConfirmation
    );
    harness
}

/// WHAT: Choosing discard stops the recorder exactly once
/// WHY: A discarded track must not be saved
#[test]
#[allow(clippy::unwrap_used)]
fn given_pending_confirmation_when_discarding_then_stopped_without_saving() {
    // Given: A stop awaiting confirmation
    let harness = harness_awaiting_confirmation();

    // When: Discarding
    harness.prompt.take().unwrap().discard();

    // Then: Stopped without saving, Inactive
    assert_eq!(harness.recorder.discards(), 1);
    assert!(harness.recorder.saves().is_empty());
    assert_eq!(harness.manager.current_state(), RecordingState::Inactive);
    assert!(!harness.manager.is_awaiting_confirmation());
}

/// WHAT: Choosing save keeps the track with no name
/// WHY: The plain save action does not collect a name
#[test]
#[allow(clippy::unwrap_used)]
fn given_pending_confirmation_when_saving_then_saved_without_name() {
    // Given: A stop awaiting confirmation
    let harness = harness_awaiting_confirmation();

    // When: Saving
    harness.prompt.take().unwrap().save();

    // Then: Saved once, unnamed
    assert_eq!(harness.recorder.saves(), vec![None]);
    assert_eq!(harness.manager.current_state(), RecordingState::Inactive);
}

/// WHAT: Saving with a name passes the name to the recorder
/// WHY: The name hook must reach the backend untouched
#[test]
#[allow(clippy::unwrap_used)]
fn given_pending_confirmation_when_saving_with_name_then_name_forwarded() {
    // Given: A stop awaiting confirmation
    let harness = harness_awaiting_confirmation();

    // When: Saving with a name
    harness.prompt.take().unwrap().save_with_name("Morning ride");

    // Then: Name forwarded
    assert_eq!(
        harness.recorder.saves(),
        vec![Some("Morning ride".to_string())]
    );
}

/// WHAT: Choosing to keep recording changes nothing
/// WHY: Cancel is the only path that leaves the recording untouched
#[test]
#[allow(clippy::unwrap_used)]
fn given_pending_confirmation_when_keeping_recording_then_still_active() {
    // Given: A stop awaiting confirmation
    let harness = harness_awaiting_confirmation();

    // When: Continuing
    harness.prompt.take().unwrap().keep_recording();

    // Then: No backend stop, still Active, toggles accepted again
    assert_eq!(harness.recorder.discards(), 0);
    assert!(harness.recorder.saves().is_empty());
    assert_eq!(harness.manager.current_state(), RecordingState::Active);
    assert!(!harness.manager.is_awaiting_confirmation());
    assert_eq!(
        harness.manager.toggle(),
        ToggleOutcome::AwaitingConfirmation
    );
}

/// WHAT: Dropping an unresolved confirmation counts as keep recording
/// WHY: A dismissed dialog must not wedge the manager in the pending state
#[test]
#[allow(clippy::unwrap_used)]
fn given_pending_confirmation_when_dropped_then_pending_cleared() {
    // Given: A stop awaiting confirmation
    let harness = harness_awaiting_confirmation();

    // When: The prompt drops its confirmation
    drop(harness.prompt.take().unwrap());

    // Then: Still Active and no longer pending
    assert_eq!(harness.manager.current_state(), RecordingState::Active);
    assert!(!harness.manager.is_awaiting_confirmation());
}

/// WHAT: Observers see Active until the decision, then Inactive
/// WHY: No intermediate stopping state is exposed
#[test]
#[allow(clippy::unwrap_used)]
fn given_observer_when_confirmation_resolves_then_single_inactive_notification() {
    // Given: Observer attached while awaiting confirmation
    let harness = harness_awaiting_confirmation();
    let observer = std::rc::Rc::new(());
    let seen = harness.observe(&observer);

    // When: Discarding
    harness.prompt.take().unwrap().discard();

    // Then: Active, then Inactive
    assert_eq!(
        *seen.borrow(),
        vec![RecordingState::Active, RecordingState::Inactive]
    );
}

/// WHAT: Resolving after the manager is gone is harmless
/// WHY: A slow dialog can outlive the component that opened it
#[test]
#[allow(clippy::unwrap_used)]
fn given_dropped_manager_when_resolving_then_no_panic() {
    // Given: A pending confirmation whose manager is dropped
    let harness = harness_awaiting_confirmation();
    let confirmation = harness.prompt.take().unwrap();
    let recorder = harness.recorder.clone();
    drop(harness);

    // When: Saving
    confirmation.save();

    // Then: Nothing reached the recorder
    assert!(recorder.saves().is_empty());
}

/// WHAT: A save that the recorder rejects leaves the recording Active
/// WHY: Observers must keep seeing the recorder's real state after a fault
#[test]
#[allow(clippy::unwrap_used)]
fn given_stop_failure_when_saving_via_confirmation_then_state_stays_active() {
    // Given: A stop awaiting confirmation and a recorder that refuses to stop
    let harness = harness_awaiting_confirmation();
    harness.recorder.fail_stop(true);

    // When: Saving
    harness.prompt.take().unwrap().save();

    // Then: Nothing saved, still Active, no longer pending
    assert!(harness.recorder.saves().is_empty());
    assert_eq!(harness.manager.current_state(), RecordingState::Active);
    assert!(!harness.manager.is_awaiting_confirmation());
}

/// WHAT: Losing permission while a confirmation is pending runs the error path
/// WHY: Permission loss must stop the recorder even with a question on screen
#[test]
#[allow(clippy::unwrap_used)]
fn given_pending_confirmation_when_permission_lost_then_error_handled() {
    // Given: A stop awaiting confirmation, then permission revoked
    let harness = harness_awaiting_confirmation();
    harness.permissions.set_prohibited(true);

    // When: Toggling
    let outcome = harness.manager.toggle();

    // Then: Remediation offered, recording discarded, confirmation abandoned
    assert_eq!(
        outcome,
        ToggleOutcome::Recovered(RecordingError::LocationProhibited)
    );
    assert_eq!(harness.permissions.prompts(), 1);
    assert_eq!(harness.recorder.discards(), 1);
    assert_eq!(harness.manager.current_state(), RecordingState::Inactive);
    assert!(!harness.manager.is_awaiting_confirmation());

    // And: The abandoned confirmation no longer applies
    harness.prompt.take().unwrap().save();
    assert!(harness.recorder.saves().is_empty());
    assert_eq!(harness.manager.current_state(), RecordingState::Inactive);
}

/// WHAT: A confirmation from an earlier session cannot resolve a newer one
/// WHY: Only the decision for the recording being stopped may stop it
#[test]
#[allow(clippy::unwrap_used)]
fn given_abandoned_confirmation_when_resolved_during_new_session_then_ignored() {
    // Given: A confirmation abandoned by the error path
    let harness = harness_awaiting_confirmation();
    harness.permissions.set_prohibited(true);
    harness.manager.toggle();
    let stale = harness.prompt.take().unwrap();

    // And: A new recording awaiting its own confirmation
    harness.permissions.set_prohibited(false);
    assert_eq!(harness.manager.toggle(), ToggleOutcome::Started);
    harness.recorder.add_samples(5);
    assert_eq!(
        harness.manager.toggle(),
        ToggleOutcome::AwaitingConfirmation
    );

    // When: Resolving the stale confirmation
    stale.discard();

    // Then: The new session is untouched
    assert_eq!(harness.recorder.discards(), 1);
    assert_eq!(harness.manager.current_state(), RecordingState::Active);
    assert!(harness.manager.is_awaiting_confirmation());
}
