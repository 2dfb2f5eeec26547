use crate::Identity;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Insert payload for a profile row. Never used as an upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProfile {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewProfile {
    pub fn new(user_id: Uuid, email: impl Into<String>, full_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            email: email.into(),
            full_name: full_name.filter(|name| !name.trim().is_empty()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Row for an identity that signed in without ever getting a profile.
    pub fn for_identity(identity: &Identity) -> Self {
        Self::new(
            identity.id,
            identity.email.clone(),
            identity.display_name.clone(),
        )
    }
}
