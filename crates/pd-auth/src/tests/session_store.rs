use crate::{CancellationToken, SessionStore};

use std::sync::Arc;

use pd_core::{AuthStatus, ControllerState};

fn store() -> (Arc<SessionStore>, CancellationToken) {
    (Arc::new(SessionStore::new()), CancellationToken::new())
}

#[test]
fn given_new_store_when_read_then_initial_loading_snapshot() {
    let (store, _) = store();

    let state = store.snapshot();

    assert_eq!(state, ControllerState::initial());
    assert_eq!(state.status(), AuthStatus::Loading);
}

#[test]
fn given_idle_store_when_committed_then_loading_derived_false() {
    let (store, token) = store();

    let committed = store.commit(&token, ControllerState::initial());

    assert!(committed);
    assert!(!store.snapshot().loading);
}

#[test]
fn given_cancelled_token_when_committed_then_write_discarded() {
    let (store, token) = store();
    token.cancel();

    let committed = store.commit(&token, ControllerState::unauthenticated().with_error("late"));

    assert!(!committed);
    assert_eq!(store.snapshot(), ControllerState::initial());
}

#[test]
fn given_unchanged_state_when_modified_then_subscribers_not_notified() {
    let (store, token) = store();
    store.commit(&token, ControllerState::unauthenticated());
    let mut rx = store.subscribe();
    rx.borrow_and_update();

    store.modify(&token, |state| state.error = None);

    assert!(!rx.has_changed().unwrap());
}

#[test]
fn given_error_when_operation_begins_then_loading_set_and_error_cleared() {
    let (store, token) = store();
    store.commit(&token, ControllerState::unauthenticated().with_error("old"));

    let _slot = store.begin(&token);

    let state = store.snapshot();
    assert!(state.loading);
    assert_eq!(state.error, None);
    assert_eq!(store.in_flight(), 1);
}

#[test]
fn given_two_operations_when_first_finishes_then_still_loading() {
    let (store, token) = store();
    store.commit(&token, ControllerState::unauthenticated());

    let first = store.begin(&token);
    let second = store.begin(&token);

    first.finish(|state| state.error = Some("first".into()));
    assert!(store.snapshot().loading);

    second.finish(|state| state.error = None);
    let state = store.snapshot();
    assert!(!state.loading);
    assert_eq!(store.in_flight(), 0);
}

#[test]
fn given_unfinished_slot_when_dropped_then_loading_released() {
    let (store, token) = store();
    store.commit(&token, ControllerState::unauthenticated());

    let slot = store.begin(&token);
    drop(slot);

    assert!(!store.snapshot().loading);
    assert_eq!(store.in_flight(), 0);
}

#[test]
fn given_operation_in_flight_when_committed_then_loading_stays_true() {
    let (store, token) = store();
    let _slot = store.begin(&token);

    store.commit(&token, ControllerState::unauthenticated());

    assert!(store.snapshot().loading);
}

#[test]
fn given_cancelled_token_when_slot_finishes_then_counter_still_released() {
    let (store, token) = store();
    let slot = store.begin(&token);
    token.cancel();

    let committed = slot.finish(|state| state.error = Some("late".into()));

    assert!(!committed);
    assert_eq!(store.in_flight(), 0);
    assert_eq!(store.snapshot().error, None);
}

#[test]
fn given_operation_settled_after_read_when_committed_since_then_discarded() {
    let (store, token) = store();
    store.commit(&token, ControllerState::unauthenticated());
    let generation = store.generation();

    store.begin(&token).finish(|_| {});
    let committed = store.commit_since(&token, generation, ControllerState::initial());

    assert!(!committed);
    assert_eq!(store.snapshot(), ControllerState::unauthenticated());
    assert_eq!(store.generation(), generation + 1);
}

#[test]
fn given_nothing_settled_after_read_when_committed_since_then_written() {
    let (store, token) = store();
    let generation = store.generation();
    let _slot = store.begin(&token);

    let committed = store.commit_since(
        &token,
        generation,
        ControllerState::unauthenticated().with_error("pushed"),
    );

    assert!(committed);
    let state = store.snapshot();
    assert_eq!(state.error.as_deref(), Some("pushed"));
    assert!(state.loading);
}
