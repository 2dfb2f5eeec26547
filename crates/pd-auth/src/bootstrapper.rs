//! Resolves the session at startup and follows pushed session changes.

use crate::{
    AuthService, CancellationToken, InFlight, PROFILE_UNAVAILABLE, ProfileSynchronizer,
    SessionChange, SessionChanges, SessionStore,
};

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use log::{debug, error, info, warn};
use pd_core::{ControllerState, Session};

pub const INITIALIZE_FAILED: &str = "Failed to initialize authentication";
pub const SESSION_CHANGE_FAILED: &str = "Authentication error";

pub struct SessionBootstrapper {
    auth: Arc<dyn AuthService>,
    sync: ProfileSynchronizer,
    store: Arc<SessionStore>,
    token: CancellationToken,
}

impl SessionBootstrapper {
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

    /// Query the existing session and write the first settled snapshot.
    /// `slot` is the in-flight marker taken when the controller started.
    pub async fn initialize(&self, slot: InFlight) {
        let resolved = AssertUnwindSafe(self.resolve_initial())
            .catch_unwind()
            .await;

        let committed = match resolved {
            Ok(next) => slot.finish(move |state| *state = next),
            Err(_) => {
                error!("Panic while initializing authentication");
                slot.finish(|state| state.error = Some(INITIALIZE_FAILED.to_string()))
            }
        };

        if committed {
            info!("Authentication initialized");
        }
    }

    /// Apply pushed changes until the token is cancelled or the publisher goes away.
    pub async fn listen(&self, mut changes: SessionChanges) {
        loop {
            tokio::select! {
                _ = self.token.cancelled() => break,
                change = changes.next() => match change {
                    Some(change) => self.apply_change(change).await,
                    None => {
                        debug!("Session change publisher closed");
                        break;
                    }
                },
            }
        }
        debug!("Session change listener stopped");
    }

    /// Re-run session resolution with the notification's payload. The result
    /// is dropped if a gateway operation settled while it was resolving.
    pub async fn apply_change(&self, change: SessionChange) {
        if self.token.is_cancelled() {
            return;
        }
        debug!("Handling session change {}", change.event);
        let generation = self.store.generation();

        let resolved = AssertUnwindSafe(self.state_for(change.session))
            .catch_unwind()
            .await;

        match resolved {
            Ok(next) => {
                self.store.commit_since(&self.token, generation, next);
            }
            Err(_) => {
                error!("Panic while handling session change {}", change.event);
                self.store.modify(&self.token, |state| {
                    state.error = Some(SESSION_CHANGE_FAILED.to_string())
                });
            }
        }
    }

    async fn resolve_initial(&self) -> ControllerState {
        match self.auth.get_session().await {
            Ok(session) => self.state_for(session).await,
            Err(e) => {
                warn!("Error getting session: {}", e);
                ControllerState::unauthenticated().with_error(e.message())
            }
        }
    }

    async fn state_for(&self, session: Option<Session>) -> ControllerState {
        let Some(session) = session else {
            return ControllerState::unauthenticated();
        };

        match self.sync.resolve_profile(&session.identity).await {
            Some(profile) => ControllerState::authenticated(
                session.identity,
                profile,
                Some(session.access_token),
            ),
            None => {
                warn!("Session for {} has no usable profile", session.identity.id);
                ControllerState::unauthenticated().with_error(PROFILE_UNAVAILABLE)
            }
        }
    }
}
