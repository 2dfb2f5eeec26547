use crate::http::SessionFile;
use crate::http::wire::{WireSession, WireSignup, error_message};
use crate::{
    AccountCreation, AccountMetadata, AuthService, Credentials, ProfileStore, RemoteError,
    RemoteResult, SessionBroadcaster, SessionChange, SessionSubscription,
};

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use pd_config::{Config, DEFAULT_PROFILE_TABLE, DEFAULT_REFRESH_LEEWAY_SECS};
use pd_core::{NewProfile, Profile, ProfilePatch, Session};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

/// HTTP client for a GoTrue/PostgREST-style backend.
///
/// Holds the current session itself (optionally mirrored to a
/// [`SessionFile`]) and publishes every session change it causes.
pub struct RemoteClient {
    base_url: String,
    anon_key: String,
    profile_table: String,
    auto_refresh: bool,
    refresh_leeway_secs: i64,
    session_file: Option<SessionFile>,
    session: RwLock<Option<Session>>,
    broadcaster: SessionBroadcaster,
    client: ReqwestClient,
}

impl RemoteClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Service URL (e.g., "http://127.0.0.1:54321")
    /// * `anon_key` - Public API key sent with every request
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            profile_table: DEFAULT_PROFILE_TABLE.to_string(),
            auto_refresh: true,
            refresh_leeway_secs: DEFAULT_REFRESH_LEEWAY_SECS as i64,
            session_file: None,
            session: RwLock::new(None),
            broadcaster: SessionBroadcaster::default(),
            client: ReqwestClient::new(),
        }
    }

    /// Build a client from loaded configuration, restoring a persisted
    /// session when persistence is enabled.
    pub fn from_config(config: &Config) -> RemoteResult<Self> {
        let remote = &config.remote;
        let anon_key = remote
            .anon_key
            .as_deref()
            .ok_or_else(|| RemoteError::configuration("remote.anon_key is not set"))?;

        let mut client = Self::new(&remote.url, anon_key)
            .with_profile_table(&remote.profile_table)
            .with_auto_refresh(remote.auto_refresh_token, remote.refresh_leeway_secs)
            .with_timeout(Duration::from_secs(remote.request_timeout_secs))?;

        let session_path = config
            .session_path()
            .map_err(|e| RemoteError::configuration(e.to_string()))?;
        if let Some(path) = session_path {
            client = client.with_session_file(SessionFile::new(path));
        }

        Ok(client)
    }

    pub fn with_profile_table(mut self, table: &str) -> Self {
        self.profile_table = table.to_string();
        self
    }

    pub fn with_auto_refresh(mut self, enabled: bool, leeway_secs: u64) -> Self {
        self.auto_refresh = enabled;
        self.refresh_leeway_secs = i64::try_from(leeway_secs).unwrap_or(i64::MAX);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> RemoteResult<Self> {
        self.client = ReqwestClient::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Persist sessions to `file`, seeding the current session from it.
    pub fn with_session_file(mut self, file: SessionFile) -> Self {
        self.session = RwLock::new(file.load());
        self.session_file = Some(file);
        self
    }

    /// Hub this client publishes session changes to.
    pub fn broadcaster(&self) -> &SessionBroadcaster {
        &self.broadcaster
    }

    /// Session as currently held, without any refresh attempt.
    pub async fn current_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    /// Build a request carrying the API key and the best available bearer.
    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let bearer = match self.session.read().await.as_ref() {
            Some(session) => session.access_token.as_str().to_string(),
            None => self.anon_key.clone(),
        };
        self.request_with_bearer(method, path, &bearer)
    }

    fn request_with_bearer(&self, method: Method, path: &str, bearer: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", bearer))
    }

    /// Execute request and handle errors. An empty success body yields None.
    async fn execute(&self, req: RequestBuilder) -> RemoteResult<Option<Value>> {
        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .as_ref()
                .and_then(error_message)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            return Err(RemoteError::rejected_with_status(status.as_u16(), message));
        }

        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| RemoteError::decode(format!("Invalid JSON body: {}", e)))
    }

    async fn execute_as<T: DeserializeOwned>(&self, req: RequestBuilder) -> RemoteResult<T> {
        let body = self
            .execute(req)
            .await?
            .ok_or_else(|| RemoteError::decode("Empty response body"))?;
        decode(body)
    }

    /// First row of a representation response.
    async fn execute_row(&self, req: RequestBuilder) -> RemoteResult<Option<Profile>> {
        match self.execute(req).await? {
            Some(body) => Ok(decode::<Vec<Profile>>(body)?.into_iter().next()),
            None => Ok(None),
        }
    }

    fn profile_path(&self, user_id: Uuid) -> String {
        format!(
            "/rest/v1/{}?user_id=eq.{}&select=*",
            self.profile_table, user_id
        )
    }

    // =========================================================================
    // Session bookkeeping
    // =========================================================================

    async fn store_session(&self, session: Option<Session>) {
        if let Some(file) = &self.session_file {
            let persisted = match &session {
                Some(session) => file.save(session),
                None => file.clear(),
            };
            if let Err(e) = persisted {
                warn!("Failed to persist session state: {}", e);
            }
        }
        *self.session.write().await = session;
    }

    async fn sign_in_with(&self, session: Session) {
        self.store_session(Some(session.clone())).await;
        self.broadcaster.publish(SessionChange::signed_in(session));
    }

    async fn drop_session(&self) {
        self.store_session(None).await;
        self.broadcaster.publish(SessionChange::signed_out());
    }

    async fn refresh(&self, refresh_token: &str) -> RemoteResult<Session> {
        #[derive(Serialize)]
        struct RefreshRequest<'a> {
            refresh_token: &'a str,
        }

        let req = self
            .request_with_bearer(
                Method::POST,
                "/auth/v1/token?grant_type=refresh_token",
                &self.anon_key,
            )
            .json(&RefreshRequest { refresh_token });
        let wire: WireSession = self.execute_as(req).await?;
        Ok(wire.into_session(now()))
    }
}

#[async_trait]
impl AuthService for RemoteClient {
    /// Current session, refreshed first when it is about to expire.
    /// A rejected refresh signs the user out; transport failures are errors.
    async fn get_session(&self) -> RemoteResult<Option<Session>> {
        let Some(session) = self.current_session().await else {
            return Ok(None);
        };

        if !self.auto_refresh || !session.is_expired(now(), self.refresh_leeway_secs) {
            return Ok(Some(session));
        }

        let Some(refresh_token) = session.refresh_token.clone() else {
            info!("Session for {} expired without refresh token", session.identity.id);
            self.drop_session().await;
            return Ok(None);
        };

        match self.refresh(&refresh_token).await {
            Ok(refreshed) => {
                info!("Refreshed session for {}", refreshed.identity.id);
                self.store_session(Some(refreshed.clone())).await;
                self.broadcaster
                    .publish(SessionChange::token_refreshed(refreshed.clone()));
                Ok(Some(refreshed))
            }
            Err(e @ RemoteError::Rejected { .. }) => {
                warn!("Session refresh rejected, signing out: {}", e);
                self.drop_session().await;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn on_session_change(&self) -> SessionSubscription {
        self.broadcaster.subscribe()
    }

    async fn create_account(
        &self,
        email: &str,
        password: &str,
        metadata: &AccountMetadata,
    ) -> RemoteResult<AccountCreation> {
        #[derive(Serialize)]
        struct SignupRequest<'a> {
            email: &'a str,
            password: &'a str,
            data: &'a AccountMetadata,
        }

        let req = self
            .request_with_bearer(Method::POST, "/auth/v1/signup", &self.anon_key)
            .json(&SignupRequest {
                email,
                password,
                data: metadata,
            });
        let wire: WireSignup = self.execute_as(req).await?;
        let (identity, session) = wire.into_parts(now());

        if let Some(session) = &session {
            self.sign_in_with(session.clone()).await;
        }
        debug!(
            "Sign up returned identity={}, session={}",
            identity.is_some(),
            session.is_some()
        );

        Ok(AccountCreation { identity, session })
    }

    async fn verify_credentials(&self, email: &str, password: &str) -> RemoteResult<Credentials> {
        #[derive(Serialize)]
        struct PasswordRequest<'a> {
            email: &'a str,
            password: &'a str,
        }

        let req = self
            .request_with_bearer(
                Method::POST,
                "/auth/v1/token?grant_type=password",
                &self.anon_key,
            )
            .json(&PasswordRequest { email, password });
        let wire: WireSession = self.execute_as(req).await?;
        let session = wire.into_session(now());

        self.sign_in_with(session.clone()).await;
        Ok(Credentials {
            identity: Some(session.identity.clone()),
            session: Some(session),
        })
    }

    /// Invalidating without a session, or one the service no longer knows,
    /// succeeds and still publishes the sign-out.
    async fn invalidate_session(&self) -> RemoteResult<()> {
        let Some(session) = self.current_session().await else {
            debug!("No session to invalidate");
            self.drop_session().await;
            return Ok(());
        };

        let req =
            self.request_with_bearer(Method::POST, "/auth/v1/logout", session.access_token.as_str());
        match self.execute(req).await {
            Ok(_) => {}
            Err(e) if is_stale_session(&e) => {
                debug!("Session already invalid remotely: {}", e);
            }
            Err(e) => return Err(e),
        }

        self.drop_session().await;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for RemoteClient {
    async fn get(&self, user_id: Uuid) -> RemoteResult<Option<Profile>> {
        let req = self.request(Method::GET, &self.profile_path(user_id)).await;
        self.execute_row(req).await
    }

    async fn insert(&self, row: NewProfile) -> RemoteResult<Option<Profile>> {
        let path = format!("/rest/v1/{}", self.profile_table);
        let req = self
            .request(Method::POST, &path)
            .await
            .header("Prefer", "return=representation")
            .json(&row);
        self.execute_row(req).await
    }

    async fn update(&self, user_id: Uuid, patch: &ProfilePatch) -> RemoteResult<Option<Profile>> {
        #[derive(Serialize)]
        struct UpdateRequest<'a> {
            #[serde(flatten)]
            patch: &'a ProfilePatch,
            updated_at: DateTime<Utc>,
        }

        let body = UpdateRequest {
            patch,
            updated_at: Utc::now(),
        };
        let req = self
            .request(Method::PATCH, &self.profile_path(user_id))
            .await
            .header("Prefer", "return=representation")
            .json(&body);
        self.execute_row(req).await
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> RemoteResult<T> {
    serde_json::from_value(body)
        .map_err(|e| RemoteError::decode(format!("Unexpected response shape: {}", e)))
}

fn is_stale_session(err: &RemoteError) -> bool {
    matches!(
        err.status().and_then(|code| StatusCode::from_u16(code).ok()),
        Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND)
    )
}

fn now() -> i64 {
    Utc::now().timestamp()
}
