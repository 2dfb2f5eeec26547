//! Authenticated principal issued by the remote auth service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The principal returned after successful credential verification.
///
/// Identities are replaced wholesale on sign-in/sign-out and never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    /// Display name supplied as account metadata at registration
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}
