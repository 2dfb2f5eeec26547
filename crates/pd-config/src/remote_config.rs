use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_AUTO_REFRESH_TOKEN, DEFAULT_PERSIST_SESSION,
    DEFAULT_PROFILE_TABLE, DEFAULT_REFRESH_LEEWAY_SECS, DEFAULT_REMOTE_URL,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SESSION_FILE, MAX_REFRESH_LEEWAY_SECS,
    MAX_REQUEST_TIMEOUT_SECS, MIN_REQUEST_TIMEOUT_SECS,
};

use std::fmt;

use serde::Deserialize;

/// Connection settings for the remote auth/profile service.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Project base URL (e.g., "https://xyz.supabase.co")
    pub url: String,
    /// Public (anon) API key sent with every request
    pub anon_key: Option<String>,
    /// Table holding one profile row per identity
    pub profile_table: String,
    /// Refresh expired sessions transparently in get_session
    pub auto_refresh_token: bool,
    /// Persist the session between runs
    pub persist_session: bool,
    /// Session file name, relative to the config dir
    pub session_file: String,
    pub request_timeout_secs: u64,
    /// Treat a session as expired this many seconds early
    pub refresh_leeway_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_REMOTE_URL),
            anon_key: None,
            profile_table: String::from(DEFAULT_PROFILE_TABLE),
            auto_refresh_token: DEFAULT_AUTO_REFRESH_TOKEN,
            persist_session: DEFAULT_PERSIST_SESSION,
            session_file: String::from(DEFAULT_SESSION_FILE),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            refresh_leeway_secs: DEFAULT_REFRESH_LEEWAY_SECS,
        }
    }
}

impl RemoteConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ConfigError::remote(format!(
                "remote.url must start with http:// or https://, got '{}'",
                self.url
            )));
        }

        match self.anon_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => {
                return Err(ConfigError::remote(
                    "remote.anon_key is required (set PD_REMOTE_ANON_KEY)",
                ));
            }
        }

        if self.profile_table.is_empty()
            || !self
                .profile_table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::remote(format!(
                "remote.profile_table must be a non-empty identifier, got '{}'",
                self.profile_table
            )));
        }

        let session_path = std::path::Path::new(&self.session_file);
        if self.session_file.is_empty()
            || session_path.is_absolute()
            || self.session_file.contains("..")
        {
            return Err(ConfigError::remote(
                "remote.session_file must be relative and cannot contain '..'",
            ));
        }

        if self.request_timeout_secs < MIN_REQUEST_TIMEOUT_SECS
            || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS
        {
            return Err(ConfigError::remote(format!(
                "remote.request_timeout_secs must be {}-{}, got {}",
                MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS, self.request_timeout_secs
            )));
        }

        if self.refresh_leeway_secs > MAX_REFRESH_LEEWAY_SECS {
            return Err(ConfigError::remote(format!(
                "remote.refresh_leeway_secs must be 0-{}, got {}",
                MAX_REFRESH_LEEWAY_SECS, self.refresh_leeway_secs
            )));
        }

        Ok(())
    }
}

// Hand-written so the anon key never reaches a log line.
impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("url", &self.url)
            .field("anon_key", &self.anon_key.as_ref().map(|_| "<redacted>"))
            .field("profile_table", &self.profile_table)
            .field("auto_refresh_token", &self.auto_refresh_token)
            .field("persist_session", &self.persist_session)
            .field("session_file", &self.session_file)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("refresh_leeway_secs", &self.refresh_leeway_secs)
            .finish()
    }
}
