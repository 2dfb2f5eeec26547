use crate::{Identity, Session, SessionToken};

use uuid::Uuid;

fn session_expiring_at(expires_at: Option<i64>) -> Session {
    let mut session = Session::new(
        SessionToken::new("access"),
        Identity::new(Uuid::new_v4(), "a@b.com"),
    );
    session.expires_at = expires_at;
    session
}

#[test]
fn given_session_without_expiry_when_checked_then_not_expired() {
    assert!(!session_expiring_at(None).is_expired(1_000, 60));
}

#[test]
fn given_session_inside_leeway_when_checked_then_expired() {
    assert!(session_expiring_at(Some(1_030)).is_expired(1_000, 60));
    assert!(!session_expiring_at(Some(1_100)).is_expired(1_000, 60));
}

#[test]
fn given_token_when_debug_formatted_then_value_hidden() {
    let token = SessionToken::new("eyJhbGciOi");

    assert_eq!(format!("{token:?}"), "SessionToken(<redacted>)");
    assert_eq!(token.as_str(), "eyJhbGciOi");
}
