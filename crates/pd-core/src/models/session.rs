//! Live authenticated context as tracked by the remote service.

use crate::{Identity, SessionToken};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: SessionToken,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Expiry as a Unix timestamp, when the provider reports one
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub identity: Identity,
}

impl Session {
    pub fn new(access_token: SessionToken, identity: Identity) -> Self {
        Self {
            access_token,
            refresh_token: None,
            expires_at: None,
            identity,
        }
    }

    /// True when the session expires within `leeway_secs` of `now`.
    /// Sessions without an expiry never expire locally.
    pub fn is_expired(&self, now: i64, leeway_secs: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at <= now + leeway_secs)
    }
}
