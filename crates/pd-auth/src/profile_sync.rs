use crate::{ProfileStore, RemoteResult};

use std::sync::Arc;

use log::{error, info, warn};
use pd_core::{Identity, NewProfile, Profile, ProfilePatch};
use uuid::Uuid;

/// Fetches or creates the profile row belonging to an identity.
#[derive(Clone)]
pub struct ProfileSynchronizer {
    profiles: Arc<dyn ProfileStore>,
}

impl ProfileSynchronizer {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    /// Look up the profile row. Not-found and fetch errors both yield None.
    pub async fn fetch_profile(&self, user_id: Uuid) -> Option<Profile> {
        match self.profiles.get(user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                error!("Error fetching user profile for {}: {}", user_id, e);
                None
            }
        }
    }

    /// Insert a new profile row. Returns whether the insert succeeded.
    ///
    /// Calling this for an identity that already has a row is a caller error;
    /// whether that conflicts or overwrites is up to the remote service.
    pub async fn create_profile(
        &self,
        user_id: Uuid,
        email: &str,
        display_name: Option<&str>,
    ) -> bool {
        self.insert(NewProfile::new(user_id, email, display_name.map(String::from)))
            .await
            .is_some()
    }

    /// Profile for a freshly resolved identity: fetch, and insert once if the
    /// row is missing.
    pub async fn resolve_profile(&self, identity: &Identity) -> Option<Profile> {
        if let Some(profile) = self.fetch_profile(identity.id).await {
            return Some(profile);
        }

        info!("No profile row for {}, creating one", identity.id);
        match self.insert(NewProfile::for_identity(identity)).await {
            Some(Some(profile)) => Some(profile),
            // Not echoed, or a concurrent resolution created the row first
            _ => self.fetch_profile(identity.id).await,
        }
    }

    /// Apply a partial update server-side. The echoed row is ignored; callers
    /// re-fetch with [`ProfileSynchronizer::fetch_profile`].
    pub async fn apply_update(&self, user_id: Uuid, patch: &ProfilePatch) -> RemoteResult<()> {
        self.profiles.update(user_id, patch).await.map(|_| ())
    }

    async fn insert(&self, row: NewProfile) -> Option<Option<Profile>> {
        let user_id = row.user_id;
        match self.profiles.insert(row).await {
            Ok(profile) => {
                info!("Created user profile for {}", user_id);
                Some(profile)
            }
            Err(e) => {
                warn!("Error creating user profile for {}: {}", user_id, e);
                None
            }
        }
    }
}
