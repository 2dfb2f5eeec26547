use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Coarse session status derived from a controller snapshot.
///
/// "Errored" is not a status of its own: an error overlays either
/// `Unauthenticated` or `Authenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// An operation started by the controller is still in flight
    #[default]
    Loading,
    Unauthenticated,
    Authenticated,
}

impl AuthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticated => "authenticated",
        }
    }
}

impl FromStr for AuthStatus {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "loading" => Ok(Self::Loading),
            "unauthenticated" => Ok(Self::Unauthenticated),
            "authenticated" => Ok(Self::Authenticated),
            _ => Err(CoreError::InvalidAuthStatus {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
