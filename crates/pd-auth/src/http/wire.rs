use pd_core::{Identity, Session, SessionToken};

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

/// Fields an error body may carry its message in, most specific first.
const ERROR_MESSAGE_FIELDS: [&str; 4] = ["msg", "message", "error_description", "error"];

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireUserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: WireUserMetadata,
}

impl WireUser {
    pub fn into_identity(self) -> Identity {
        let identity = Identity::new(self.id, self.email.unwrap_or_default());
        match self.user_metadata.full_name {
            Some(name) if !name.trim().is_empty() => identity.with_display_name(name),
            _ => identity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: WireUser,
}

impl WireSession {
    /// `now` resolves a relative `expires_in` when no absolute expiry is sent.
    pub fn into_session(self, now: i64) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now + secs));

        Session {
            access_token: SessionToken::new(self.access_token),
            refresh_token: self.refresh_token,
            expires_at,
            identity: self.user.into_identity(),
        }
    }
}

/// Sign-up answers with a session when no confirmation is required, with the
/// bare user when it is, and some deployments wrap both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireSignup {
    Session(WireSession),
    User(WireUser),
    Wrapped {
        #[serde(default)]
        user: Option<WireUser>,
        #[serde(default)]
        session: Option<WireSession>,
    },
}

impl WireSignup {
    pub fn into_parts(self, now: i64) -> (Option<Identity>, Option<Session>) {
        match self {
            Self::Session(session) => {
                let session = session.into_session(now);
                (Some(session.identity.clone()), Some(session))
            }
            Self::User(user) => (Some(user.into_identity()), None),
            Self::Wrapped { user, session } => {
                let session = session.map(|s| s.into_session(now));
                let identity = user
                    .map(WireUser::into_identity)
                    .or_else(|| session.as_ref().map(|s| s.identity.clone()));
                (identity, session)
            }
        }
    }
}

/// Human-readable message from an error body, if it carries one.
pub(crate) fn error_message(body: &Value) -> Option<String> {
    ERROR_MESSAGE_FIELDS
        .iter()
        .find_map(|field| body.get(field).and_then(Value::as_str))
        .filter(|message| !message.trim().is_empty())
        .map(String::from)
}
