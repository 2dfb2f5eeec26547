//! One immutable snapshot of the auth controller.

use crate::{AuthStatus, Identity, Profile, SessionToken};

/// Snapshot published by the session store.
///
/// `identity` and `profile` are both present or both absent in every
/// published snapshot. `loading` is true only while a controller-initiated
/// operation is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerState {
    pub identity: Option<Identity>,
    pub profile: Option<Profile>,
    pub session_token: Option<SessionToken>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ControllerState {
    /// State before the bootstrapper has resolved anything.
    pub fn initial() -> Self {
        Self {
            loading: true,
            ..Self::unauthenticated()
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            identity: None,
            profile: None,
            session_token: None,
            loading: false,
            error: None,
        }
    }

    pub fn authenticated(
        identity: Identity,
        profile: Profile,
        session_token: Option<SessionToken>,
    ) -> Self {
        Self {
            identity: Some(identity),
            profile: Some(profile),
            session_token,
            loading: false,
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn status(&self) -> AuthStatus {
        if self.loading {
            AuthStatus::Loading
        } else if self.is_authenticated() {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some() && self.profile.is_some()
    }

    pub fn has_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }

    /// Identity and profile are paired (both present or both absent).
    pub fn is_consistent(&self) -> bool {
        self.identity.is_some() == self.profile.is_some()
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::initial()
    }
}
