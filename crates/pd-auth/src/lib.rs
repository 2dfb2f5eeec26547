//! Client-side authentication and session-state controller.
//!
//! The [`AuthController`] owns a single [`SessionStore`] snapshot, keeps it in
//! sync with the remote auth service (initial session lookup plus pushed
//! session changes) and exposes the only mutating entry points through its
//! gateway.

pub mod bootstrapper;
pub mod cancellation;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod http;
pub mod profile_sync;
pub mod remote;
pub mod session_store;

pub use bootstrapper::SessionBootstrapper;
pub use cancellation::CancellationToken;
pub use controller::AuthController;
pub use error::{RemoteError, Result as RemoteResult};
pub use gateway::{
    AuthGateway, NO_AUTHENTICATED_USER, PROFILE_CREATE_FAILED, PROFILE_REFRESH_FAILED,
    PROFILE_UNAVAILABLE,
};
pub use http::{RemoteClient, SessionFile};
pub use profile_sync::ProfileSynchronizer;
pub use remote::{
    AccountCreation, AccountMetadata, AuthService, Credentials, ProfileStore, SessionBroadcaster,
    SessionChange, SessionChanges, SessionEvent, SessionSubscription, SubscriptionHandle,
};
pub use session_store::{InFlight, SessionStore};

#[cfg(test)]
mod tests;
