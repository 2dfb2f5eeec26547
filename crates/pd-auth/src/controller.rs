//! Single-instance owner of the store, its bootstrap task and the gateway.

use crate::{
    AuthGateway, AuthService, CancellationToken, ProfileStore, ProfileSynchronizer,
    SessionBootstrapper, SessionStore, SubscriptionHandle,
};

use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info, warn};
use pd_core::{AuthOutcome, ControllerState, ProfilePatch};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// The auth controller handed to UI collaborators.
///
/// Construct one per application session with [`AuthController::start`];
/// tests build as many isolated instances as they need. Teardown cancels the
/// shared token and unsubscribes from session changes exactly once; after
/// that no component writes to the store again.
pub struct AuthController {
    store: Arc<SessionStore>,
    gateway: AuthGateway,
    token: CancellationToken,
    subscription: Mutex<Option<SubscriptionHandle>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl AuthController {
    /// Subscribe to session changes, then resolve the existing session in a
    /// background task that goes on to follow the subscription.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(auth: Arc<dyn AuthService>, profiles: Arc<dyn ProfileStore>) -> Self {
        let store = Arc::new(SessionStore::new());
        let token = CancellationToken::new();
        let sync = ProfileSynchronizer::new(profiles);

        // Subscribe first so a change racing the initial lookup is not lost
        let (changes, handle) = auth.on_session_change().into_parts();
        let slot = store.begin(&token);

        let bootstrapper = SessionBootstrapper::new(
            Arc::clone(&auth),
            sync.clone(),
            Arc::clone(&store),
            token.clone(),
        );
        let task = tokio::spawn(async move {
            bootstrapper.initialize(slot).await;
            bootstrapper.listen(changes).await;
        });

        let gateway = AuthGateway::new(auth, sync, Arc::clone(&store), token.clone());
        info!("Auth controller started");

        Self {
            store,
            gateway,
            token,
            subscription: Mutex::new(Some(handle)),
            task: Mutex::new(Some(task)),
        }
    }

    pub fn snapshot(&self) -> ControllerState {
        self.store.snapshot()
    }

    /// Reactive view of the snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.store.subscribe()
    }

    /// Wait until no operation is in flight and return that snapshot.
    /// Returns the current snapshot immediately once torn down.
    pub async fn settled(&self) -> ControllerState {
        let mut rx = self.store.subscribe();
        let idle = async { rx.wait_for(|state| !state.loading).await.map(|state| state.clone()) };
        tokio::select! {
            _ = self.token.cancelled() => self.store.snapshot(),
            result = idle => result.unwrap_or_else(|_| self.store.snapshot()),
        }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> AuthOutcome {
        self.gateway.register(email, password, display_name).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthOutcome {
        self.gateway.sign_in(email, password).await
    }

    pub async fn sign_out(&self) {
        self.gateway.sign_out().await
    }

    pub async fn update_profile(&self, patch: &ProfilePatch) -> AuthOutcome {
        self.gateway.update_profile(patch).await
    }

    pub fn clear_error(&self) {
        self.gateway.clear_error()
    }

    /// Handle for callers that need to run operations from spawned tasks.
    pub fn gateway(&self) -> AuthGateway {
        self.gateway.clone()
    }

    /// Cancel every pending write and unsubscribe from session changes.
    /// Idempotent; does not wait for the background task.
    pub fn teardown(&self) {
        self.token.cancel();

        let handle = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.unsubscribe();
            info!("Auth controller torn down");
        }
    }

    /// Tear down and wait for the background task to stop.
    pub async fn shutdown(&self) {
        self.teardown();

        let task = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            match task.await {
                Ok(()) => debug!("Session listener task joined"),
                Err(e) => warn!("Session listener task ended abnormally: {}", e),
            }
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for AuthController {
    fn drop(&mut self) {
        self.teardown();
    }
}
