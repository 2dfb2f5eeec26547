use crate::AuthStatus;

use std::str::FromStr;

#[test]
fn test_auth_status_as_str() {
    assert_eq!(AuthStatus::Loading.as_str(), "loading");
    assert_eq!(AuthStatus::Unauthenticated.as_str(), "unauthenticated");
    assert_eq!(AuthStatus::Authenticated.as_str(), "authenticated");
}

#[test]
fn test_auth_status_from_str() {
    assert_eq!(
        AuthStatus::from_str("authenticated").unwrap(),
        AuthStatus::Authenticated
    );
    assert!(AuthStatus::from_str("errored").is_err());
}

#[test]
fn test_auth_status_default() {
    assert_eq!(AuthStatus::default(), AuthStatus::Loading);
}
