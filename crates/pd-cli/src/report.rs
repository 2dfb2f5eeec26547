use crate::CliResult;

use std::fmt;

use chrono::{DateTime, Utc};
use pd_core::{AuthOutcome, AuthStatus, ControllerState, Identity, Profile};
use serde::Serialize;
use uuid::Uuid;

/// What a command prints. Secrets never reach a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Outcome {
        command: &'static str,
        #[serde(flatten)]
        outcome: AuthOutcome,
    },
    Status {
        status: AuthStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Identity {
        user_id: Uuid,
        email: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
    },
    Profile {
        user_id: Uuid,
        email: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        full_name: Option<String>,
        has_api_key: bool,
        updated_at: DateTime<Utc>,
    },
}

impl Report {
    pub fn outcome(command: &'static str, outcome: AuthOutcome) -> Self {
        Report::Outcome { command, outcome }
    }

    pub fn status(state: &ControllerState) -> Self {
        Report::Status {
            status: state.status(),
            email: state.identity.as_ref().map(|identity| identity.email.clone()),
            error: state.error.clone(),
        }
    }

    pub fn identity(identity: &Identity) -> Self {
        Report::Identity {
            user_id: identity.id,
            email: identity.email.clone(),
            display_name: identity.display_name.clone(),
        }
    }

    pub fn profile(profile: &Profile) -> Self {
        Report::Profile {
            user_id: profile.user_id,
            email: profile.email.clone(),
            full_name: profile.full_name.clone(),
            has_api_key: profile.has_api_key(),
            updated_at: profile.updated_at,
        }
    }

    /// Whether the process should exit successfully.
    pub fn is_success(&self) -> bool {
        match self {
            Report::Outcome { outcome, .. } => outcome.success,
            Report::Status { .. } | Report::Identity { .. } | Report::Profile { .. } => true,
        }
    }

    /// Text for stdout: pretty JSON or the human-readable form.
    pub fn render(&self, json: bool) -> CliResult<String> {
        if json {
            Ok(serde_json::to_string_pretty(self)?)
        } else {
            Ok(self.to_string())
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Outcome { command, outcome } => match &outcome.error {
                None => write!(f, "{command}: ok"),
                Some(error) => write!(f, "{command} failed: {error}"),
            },
            Report::Status {
                status,
                email,
                error,
            } => {
                write!(f, "status: {status}")?;
                if let Some(email) = email {
                    write!(f, "\nsigned in as: {email}")?;
                }
                if let Some(error) = error {
                    write!(f, "\nerror: {error}")?;
                }
                Ok(())
            }
            Report::Identity {
                user_id,
                email,
                display_name,
            } => {
                write!(f, "{email} ({user_id})")?;
                if let Some(name) = display_name {
                    write!(f, "\nname: {name}")?;
                }
                Ok(())
            }
            Report::Profile {
                user_id,
                email,
                full_name,
                has_api_key,
                updated_at,
            } => {
                writeln!(f, "user: {email} ({user_id})")?;
                writeln!(f, "name: {}", full_name.as_deref().unwrap_or("-"))?;
                writeln!(
                    f,
                    "api key: {}",
                    if *has_api_key { "set" } else { "not set" }
                )?;
                write!(f, "updated: {}", updated_at.to_rfc3339())
            }
        }
    }
}
