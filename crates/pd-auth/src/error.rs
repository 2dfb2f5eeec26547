use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failures reported by (or while talking to) the remote auth/profile service.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Remote service rejected request: {message} {location}")]
    Rejected {
        status: Option<u16>,
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("Unexpected response: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Remote client configuration error: {message} {location}")]
    Configuration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Session file error at {path}: {message} {location}")]
    SessionFile {
        path: PathBuf,
        message: String,
        location: ErrorLocation,
    },
}

impl RemoteError {
    /// Provider-reported error with its human-readable message.
    #[track_caller]
    pub fn rejected<S: Into<String>>(message: S) -> Self {
        RemoteError::Rejected {
            status: None,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn rejected_with_status<S: Into<String>>(status: u16, message: S) -> Self {
        RemoteError::Rejected {
            status: Some(status),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn decode<S: Into<String>>(message: S) -> Self {
        RemoteError::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        RemoteError::Configuration {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn session_file<S: Into<String>>(path: PathBuf, message: S) -> Self {
        RemoteError::SessionFile {
            path,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        RemoteError::Http {
            message: err.to_string(),
            source: err,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The message surfaced to the UI, verbatim and without a source location.
    pub fn message(&self) -> &str {
        match self {
            Self::Rejected { message, .. }
            | Self::Http { message, .. }
            | Self::Decode { message, .. }
            | Self::Configuration { message, .. }
            | Self::SessionFile { message, .. } => message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => *status,
            Self::Http { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        RemoteError::from_reqwest(err)
    }
}

pub type Result<T> = std::result::Result<T, RemoteError>;
