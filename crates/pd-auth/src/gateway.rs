//! The only mutation entry points of the controller.

use crate::{
    AccountMetadata, AuthService, CancellationToken, InFlight, ProfileSynchronizer, SessionStore,
};

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use log::{debug, error, info, warn};
use pd_core::{AuthOutcome, ControllerState, Profile, ProfilePatch};
use uuid::Uuid;

pub const NO_AUTHENTICATED_USER: &str = "No authenticated user";
pub const PROFILE_CREATE_FAILED: &str = "Failed to create user profile";
pub const PROFILE_UNAVAILABLE: &str = "Failed to load user profile";
pub const PROFILE_REFRESH_FAILED: &str = "Failed to refresh user profile";

const SIGN_UP_FAILED: &str = "Sign up failed";
const SIGN_IN_FAILED: &str = "Sign in failed";
const SIGN_OUT_FAILED: &str = "Sign out failed";
const PROFILE_UPDATE_FAILED: &str = "Profile update failed";

/// How a successful operation changes the snapshot.
enum Transition {
    /// Identity fields untouched; only `error` is cleared
    Keep,
    /// Replace the whole snapshot
    Replace(ControllerState),
    /// Swap in a re-fetched profile if it still belongs to the current identity
    RefreshProfile(Profile),
}

type Attempt = Result<Transition, String>;

/// Runs register/sign-in/sign-out/profile-update against the remote service
/// and settles every outcome into the store.
#[derive(Clone)]
pub struct AuthGateway {
    auth: Arc<dyn AuthService>,
    sync: ProfileSynchronizer,
    store: Arc<SessionStore>,
    token: CancellationToken,
}

impl AuthGateway {
    pub fn new(
        auth: Arc<dyn AuthService>,
        sync: ProfileSynchronizer,
        store: Arc<SessionStore>,
        token: CancellationToken,
    ) -> Self {
        Self {
            auth,
            sync,
            store,
            token,
        }
    }

    /// Create an account and its profile row.
    ///
    /// If the account is created but the profile insert fails, the operation
    /// reports failure while the remote account remains; retrying with the
    /// same email then hits "already registered" and still lacks a profile.
    /// When the provider issues a session right away the store becomes
    /// authenticated with the fresh profile. When it requires confirmation,
    /// no session is issued and the store stays unauthenticated even though
    /// the outcome is a success.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> AuthOutcome {
        let slot = self.store.begin(&self.token);
        let attempt = self.try_register(email, password, display_name);
        self.run(slot, attempt, SIGN_UP_FAILED).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthOutcome {
        let slot = self.store.begin(&self.token);
        let attempt = self.try_sign_in(email, password);
        self.run(slot, attempt, SIGN_IN_FAILED).await
    }

    /// Failure is reported only through the store's `error` field.
    pub async fn sign_out(&self) {
        let slot = self.store.begin(&self.token);
        let attempt = self.try_sign_out();
        self.run(slot, attempt, SIGN_OUT_FAILED).await;
    }

    pub async fn update_profile(&self, patch: &ProfilePatch) -> AuthOutcome {
        let Some(identity) = self.store.snapshot().identity else {
            self.store.modify(&self.token, |state| {
                state.error = Some(NO_AUTHENTICATED_USER.to_string())
            });
            return AuthOutcome::failed(NO_AUTHENTICATED_USER);
        };

        let slot = self.store.begin(&self.token);
        let attempt = self.try_update_profile(identity.id, patch.normalized());
        self.run(slot, attempt, PROFILE_UPDATE_FAILED).await
    }

    /// Clear `error` without touching anything else. No-op when already clear.
    pub fn clear_error(&self) {
        self.store.modify(&self.token, |state| state.error = None);
    }

    async fn try_register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Attempt {
        let metadata = AccountMetadata {
            full_name: display_name.map(String::from),
        };

        let creation = self
            .auth
            .create_account(email, password, &metadata)
            .await
            .map_err(|e| {
                warn!("Sign up rejected: {}", e);
                e.message().to_string()
            })?;

        let Some(identity) = creation.identity else {
            return Err(SIGN_UP_FAILED.to_string());
        };

        let created = self
            .sync
            .create_profile(identity.id, email, display_name)
            .await;
        // A session-change listener may have created the row concurrently
        let profile = match (created, &creation.session) {
            (true, None) => None,
            _ => self.sync.fetch_profile(identity.id).await,
        };
        if !created && profile.is_none() {
            error!(
                "Account {} created but its profile insert failed",
                identity.id
            );
            return Err(PROFILE_CREATE_FAILED.to_string());
        }

        let Some(session) = creation.session else {
            info!(
                "Account {} awaits confirmation, no session issued",
                identity.id
            );
            return Ok(Transition::Keep);
        };

        let Some(profile) = profile else {
            return Err(PROFILE_UNAVAILABLE.to_string());
        };

        info!("Registered and signed in as {}", identity.id);
        Ok(Transition::Replace(ControllerState::authenticated(
            identity,
            profile,
            Some(session.access_token),
        )))
    }

    async fn try_sign_in(&self, email: &str, password: &str) -> Attempt {
        let credentials = self
            .auth
            .verify_credentials(email, password)
            .await
            .map_err(|e| {
                warn!("Sign in rejected: {}", e);
                e.message().to_string()
            })?;

        let Some(identity) = credentials.identity else {
            return Err(SIGN_IN_FAILED.to_string());
        };

        let Some(profile) = self.sync.resolve_profile(&identity).await else {
            return Err(PROFILE_UNAVAILABLE.to_string());
        };

        info!("Signed in as {}", identity.id);
        let session_token = credentials.session.map(|session| session.access_token);
        Ok(Transition::Replace(ControllerState::authenticated(
            identity,
            profile,
            session_token,
        )))
    }

    async fn try_update_profile(&self, user_id: Uuid, patch: ProfilePatch) -> Attempt {
        self.sync
            .apply_update(user_id, &patch)
            .await
            .map_err(|e| {
                warn!("Profile update for {} rejected: {}", user_id, e);
                e.message().to_string()
            })?;

        // Never trust the echoed row
        match self.sync.fetch_profile(user_id).await {
            Some(profile) => Ok(Transition::RefreshProfile(profile)),
            None => Err(PROFILE_REFRESH_FAILED.to_string()),
        }
    }

    async fn try_sign_out(&self) -> Attempt {
        self.auth.invalidate_session().await.map_err(|e| {
            warn!("Sign out rejected: {}", e);
            e.message().to_string()
        })?;

        info!("Signed out");
        Ok(Transition::Replace(ControllerState::unauthenticated()))
    }

    /// Drive one attempt to completion and settle it. Panics inside the
    /// attempt become failures carrying `fallback`.
    async fn run(
        &self,
        slot: InFlight,
        attempt: impl Future<Output = Attempt>,
        fallback: &str,
    ) -> AuthOutcome {
        let attempt = AssertUnwindSafe(attempt)
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                error!("Panic during auth operation, reporting '{}'", fallback);
                Err(fallback.to_string())
            });

        match attempt {
            Ok(transition) => {
                slot.finish(move |state| {
                    match transition {
                        Transition::Keep => {}
                        Transition::Replace(next) => *state = next,
                        Transition::RefreshProfile(profile) => {
                            let owner = state.identity.as_ref().map(|identity| identity.id);
                            if owner == Some(profile.user_id) {
                                state.profile = Some(profile);
                            } else {
                                debug!("Dropped refreshed profile for a replaced identity");
                            }
                        }
                    }
                    state.error = None;
                });
                AuthOutcome::ok()
            }
            Err(message) => {
                let error = message.clone();
                slot.finish(move |state| state.error = Some(error));
                AuthOutcome::failed(message)
            }
        }
    }
}
