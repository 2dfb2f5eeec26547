use crate::{AuthStatus, ControllerState, Identity, Profile, SessionToken};

use chrono::Utc;
use uuid::Uuid;

fn profile_for(identity: &Identity) -> Profile {
    Profile {
        user_id: identity.id,
        email: identity.email.clone(),
        full_name: Some("Ada".into()),
        grok_api_key: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn given_initial_state_when_inspected_then_loading_and_empty() {
    let state = ControllerState::initial();

    assert!(state.loading);
    assert!(state.identity.is_none());
    assert!(state.profile.is_none());
    assert_eq!(state.status(), AuthStatus::Loading);
}

#[test]
fn given_unauthenticated_state_when_inspected_then_settled_and_consistent() {
    let state = ControllerState::unauthenticated();

    assert!(!state.loading);
    assert!(state.is_consistent());
    assert_eq!(state.status(), AuthStatus::Unauthenticated);
}

#[test]
fn given_authenticated_state_when_inspected_then_status_authenticated() {
    let identity = Identity::new(Uuid::new_v4(), "a@b.com");
    let profile = profile_for(&identity);

    let state = ControllerState::authenticated(identity, profile, Some(SessionToken::new("tok")));

    assert!(state.is_authenticated());
    assert!(state.is_consistent());
    assert_eq!(state.status(), AuthStatus::Authenticated);
}

#[test]
fn given_error_overlay_when_inspected_then_status_unchanged() {
    let state = ControllerState::unauthenticated().with_error("Invalid login credentials");

    assert!(state.has_error());
    assert_eq!(state.status(), AuthStatus::Unauthenticated);
}

#[test]
fn given_identity_without_profile_when_checked_then_inconsistent() {
    let state = ControllerState {
        identity: Some(Identity::new(Uuid::new_v4(), "a@b.com")),
        ..ControllerState::unauthenticated()
    };

    assert!(!state.is_consistent());
    assert!(!state.is_authenticated());
}
