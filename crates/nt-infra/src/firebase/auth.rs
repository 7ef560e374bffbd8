//! Identity Toolkit client.
//!
//! Accounts are created and signed in over the REST API. The signed-in
//! session (tokens and uid) is persisted in the device key/value store so a
//! restart can restore it without a network round trip.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use nt_core::config::FirebaseConfig;
use nt_core::ports::{AuthError, AuthServicePort, ClockPort, KeyValueStorePort};
use nt_core::{AuthState, Credentials, Identity, Uid};

use super::error::{error_message, map_auth_error, transport_auth_error};
use super::session::{expires_at, StoredSession};

/// Key/value entry holding the persisted session.
pub const AUTH_SESSION_KEY: &str = "authSession";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Refresh tokens this long before they expire.
const REFRESH_MARGIN_MS: i64 = 60_000;

/// Supplies a currently valid ID token for authenticated requests.
#[async_trait]
pub trait IdTokenSource: Send + Sync {
    /// `Ok(None)` when nobody is signed in.
    async fn id_token(&self) -> Result<Option<String>, AuthError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: String,
}

/// The token endpoint answers in snake_case.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: String,
    user_id: String,
}

pub struct FirebaseAuthClient {
    http: Client,
    config: FirebaseConfig,
    persistence: Arc<dyn KeyValueStorePort>,
    clock: Arc<dyn ClockPort>,
    session: Mutex<Option<StoredSession>>,
    state: watch::Sender<AuthState>,
}

impl FirebaseAuthClient {
    pub fn new(
        config: FirebaseConfig,
        persistence: Arc<dyn KeyValueStorePort>,
        clock: Arc<dyn ClockPort>,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
        Ok(Self::with_client(http, config, persistence, clock))
    }

    pub fn with_client(
        http: Client,
        config: FirebaseConfig,
        persistence: Arc<dyn KeyValueStorePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let (state, _) = watch::channel(AuthState::Unknown);
        Self {
            http,
            config,
            persistence,
            clock,
            session: Mutex::new(None),
            state,
        }
    }

    /// Load the persisted session and report it on the identity stream.
    ///
    /// Until this runs the stream reports [`AuthState::Unknown`]. An
    /// unreadable session is treated as signed out.
    pub async fn restore_session(&self) -> AuthState {
        let restored = match self.persistence.get_item(AUTH_SESSION_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<StoredSession>(&raw) {
                Ok(session) => Some(session),
                Err(err) => {
                    warn!(error = %err, "discarding unreadable auth session");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "auth session storage unavailable");
                None
            }
        };

        let state = match &restored {
            Some(session) => AuthState::SignedIn(session.identity()),
            None => AuthState::SignedOut,
        };
        *self.session.lock().await = restored;
        info!(signed_in = state.is_signed_in(), "auth session restored");
        self.publish(state.clone());
        state
    }

    fn publish(&self, next: AuthState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    fn accounts_url(&self, action: &str) -> String {
        format!(
            "{}/v1/accounts:{}",
            self.config.identity_endpoint.trim_end_matches('/'),
            action
        )
    }

    fn token_url(&self) -> String {
        format!("{}/v1/token", self.config.token_endpoint.trim_end_matches('/'))
    }

    async fn read_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AuthError> {
        let status = response.status();
        let body = response.text().await.map_err(transport_auth_error)?;
        if !status.is_success() {
            let message = error_message(&body);
            debug!(status = status.as_u16(), %message, "identity request rejected");
            return Err(map_auth_error(&message));
        }
        serde_json::from_str(&body)
            .map_err(|e| AuthError::Service(format!("unexpected identity response: {e}")))
    }

    async fn post_accounts<T: DeserializeOwned>(
        &self,
        action: &str,
        body: &Value,
    ) -> Result<T, AuthError> {
        let response = self
            .http
            .post(self.accounts_url(action))
            .query(&[("key", self.config.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(transport_auth_error)?;
        Self::read_response(response).await
    }

    async fn persist(&self, session: Option<&StoredSession>) {
        let result = match session {
            Some(session) => match serde_json::to_string(session) {
                Ok(raw) => self.persistence.set_item(AUTH_SESSION_KEY, &raw).await,
                Err(err) => Err(err.into()),
            },
            None => self.persistence.remove_item(AUTH_SESSION_KEY).await,
        };
        if let Err(err) = result {
            warn!(error = %err, "failed to persist auth session");
        }
    }

    async fn establish(&self, account: AccountResponse) -> Identity {
        let session = StoredSession {
            uid: Uid::from(account.local_id),
            email: account.email,
            id_token: account.id_token,
            refresh_token: account.refresh_token,
            expires_at_ms: expires_at(self.clock.now_ms(), &account.expires_in),
        };
        let identity = session.identity();

        self.persist(Some(&session)).await;
        *self.session.lock().await = Some(session);
        self.publish(AuthState::SignedIn(identity.clone()));
        identity
    }

    async fn clear_session(&self) {
        *self.session.lock().await = None;
        self.persist(None).await;
        self.publish(AuthState::SignedOut);
    }

    async fn refresh(&self, session: &StoredSession) -> Result<StoredSession, AuthError> {
        debug!(uid = %session.uid, "refreshing id token");
        let response = self
            .http
            .post(self.token_url())
            .query(&[("key", self.config.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", session.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(transport_auth_error)?;
        let refreshed: RefreshResponse = Self::read_response(response).await?;

        Ok(StoredSession {
            uid: Uid::from(refreshed.user_id),
            email: session.email.clone(),
            id_token: refreshed.id_token,
            refresh_token: refreshed.refresh_token,
            expires_at_ms: expires_at(self.clock.now_ms(), &refreshed.expires_in),
        })
    }
}

#[async_trait]
impl IdTokenSource for FirebaseAuthClient {
    async fn id_token(&self) -> Result<Option<String>, AuthError> {
        let mut guard = self.session.lock().await;
        let Some(session) = guard.as_ref() else {
            return Ok(None);
        };
        if !session.expires_within(self.clock.now_ms(), REFRESH_MARGIN_MS) {
            return Ok(Some(session.id_token.clone()));
        }

        let refreshed = self.refresh(session).await?;
        let token = refreshed.id_token.clone();
        self.persist(Some(&refreshed)).await;
        *guard = Some(refreshed);
        Ok(Some(token))
    }
}

#[async_trait]
impl AuthServicePort for FirebaseAuthClient {
    async fn register_with_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Identity, AuthError> {
        let account: AccountResponse = self
            .post_accounts(
                "signUp",
                &json!({
                    "email": credentials.email,
                    "password": credentials.password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        Ok(self.establish(account).await)
    }

    async fn sign_in_with_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Identity, AuthError> {
        let account: AccountResponse = self
            .post_accounts(
                "signInWithPassword",
                &json!({
                    "email": credentials.email,
                    "password": credentials.password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        Ok(self.establish(account).await)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.clear_session().await;
        Ok(())
    }

    async fn delete_current_user(&self) -> Result<(), AuthError> {
        let id_token = self.id_token().await?.ok_or(AuthError::NotSignedIn)?;
        let _: Value = self
            .post_accounts("delete", &json!({ "idToken": id_token }))
            .await?;
        info!("identity deleted");
        self.clear_session().await;
        Ok(())
    }

    fn subscribe_to_auth_state(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    fn current_auth_state(&self) -> AuthState {
        self.state.borrow().clone()
    }
}
