//! Contract with the remote auth/profile service.

mod session_broadcaster;
mod session_change;
mod session_subscription;

pub use session_broadcaster::SessionBroadcaster;
pub use session_change::{SessionChange, SessionEvent};
pub use session_subscription::{SessionChanges, SessionSubscription, SubscriptionHandle};

use crate::RemoteResult;

use async_trait::async_trait;
use pd_core::{Identity, NewProfile, Profile, ProfilePatch, Session};
use serde::Serialize;
use uuid::Uuid;

/// Metadata attached to a new account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Result of account creation. `session` is absent when the provider
/// requires a confirmation step before issuing one.
#[derive(Debug, Clone, Default)]
pub struct AccountCreation {
    pub identity: Option<Identity>,
    pub session: Option<Session>,
}

/// Result of credential verification.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub identity: Option<Identity>,
    pub session: Option<Session>,
}

/// Session issuance, validation and change notification.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Existing valid session, if any.
    async fn get_session(&self) -> RemoteResult<Option<Session>>;

    /// Register for future session changes (other tabs, token refresh failure, ...).
    fn on_session_change(&self) -> SessionSubscription;

    async fn create_account(
        &self,
        email: &str,
        password: &str,
        metadata: &AccountMetadata,
    ) -> RemoteResult<AccountCreation>;

    async fn verify_credentials(&self, email: &str, password: &str) -> RemoteResult<Credentials>;

    async fn invalidate_session(&self) -> RemoteResult<()>;
}

/// Keyed profile row store.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_id: Uuid) -> RemoteResult<Option<Profile>>;

    /// Insert, never upsert.
    async fn insert(&self, row: NewProfile) -> RemoteResult<Option<Profile>>;

    async fn update(&self, user_id: Uuid, patch: &ProfilePatch) -> RemoteResult<Option<Profile>>;
}
