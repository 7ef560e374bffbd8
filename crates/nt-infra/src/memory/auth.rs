use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{watch, Mutex};
use tracing::info;

use nt_core::ports::{AuthError, AuthServicePort};
use nt_core::{AuthState, Credentials, Identity, Uid};

const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    uid: Uid,
    password: String,
}

/// Identity service that keeps accounts in memory.
pub struct InMemoryAuthService {
    accounts: Mutex<HashMap<String, Account>>,
    state: watch::Sender<AuthState>,
    requires_recent_login: AtomicBool,
    sign_out_offline: AtomicBool,
}

impl Default for InMemoryAuthService {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuthService {
    /// Starts signed out.
    pub fn new() -> Self {
        Self::with_state(AuthState::SignedOut)
    }

    /// Starts in [`AuthState::Unknown`] until [`resolve`](Self::resolve) is called.
    pub fn unresolved() -> Self {
        Self::with_state(AuthState::Unknown)
    }

    fn with_state(initial: AuthState) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            accounts: Mutex::new(HashMap::new()),
            state,
            requires_recent_login: AtomicBool::new(false),
            sign_out_offline: AtomicBool::new(false),
        }
    }

    /// Report `state` on the identity stream.
    pub fn resolve(&self, state: AuthState) {
        self.publish(state);
    }

    /// Make `delete_current_user` fail with [`AuthError::RequiresRecentLogin`].
    pub fn set_requires_recent_login(&self, required: bool) {
        self.requires_recent_login.store(required, Ordering::SeqCst);
    }

    /// Make `sign_out` fail with a network error and keep the session.
    pub fn set_sign_out_offline(&self, offline: bool) {
        self.sign_out_offline.store(offline, Ordering::SeqCst);
    }

    pub async fn account_exists(&self, email: &str) -> bool {
        self.accounts.lock().await.contains_key(&normalize(email))
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
}

fn normalize(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[async_trait]
impl AuthServicePort for InMemoryAuthService {
    async fn register_with_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Identity, AuthError> {
        let email = normalize(&credentials.email);
        if !email.contains('@') {
            return Err(AuthError::Service("INVALID_EMAIL".to_string()));
        }
        if credentials.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(&email) {
            return Err(AuthError::EmailAlreadyInUse);
        }

        let uid = Uid::new();
        accounts.insert(
            email.clone(),
            Account {
                uid: uid.clone(),
                password: credentials.password.clone(),
            },
        );
        drop(accounts);

        let identity = Identity::new(uid, Some(email));
        info!(uid = %identity.uid, "registered in-memory account");
        self.publish(AuthState::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_in_with_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Identity, AuthError> {
        let email = normalize(&credentials.email);
        let accounts = self.accounts.lock().await;
        let account = accounts
            .get(&email)
            .filter(|account| account.password == credentials.password)
            .ok_or(AuthError::InvalidCredentials)?;

        let identity = Identity::new(account.uid.clone(), Some(email));
        drop(accounts);

        self.publish(AuthState::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.sign_out_offline.load(Ordering::SeqCst) {
            return Err(AuthError::Network("offline".to_string()));
        }
        self.publish(AuthState::SignedOut);
        Ok(())
    }

    async fn delete_current_user(&self) -> Result<(), AuthError> {
        let current = self.current_auth_state();
        let AuthState::SignedIn(identity) = current else {
            return Err(AuthError::NotSignedIn);
        };
        if self.requires_recent_login.load(Ordering::SeqCst) {
            return Err(AuthError::RequiresRecentLogin);
        }

        self.accounts
            .lock()
            .await
            .retain(|_, account| account.uid != identity.uid);
        self.publish(AuthState::SignedOut);
        Ok(())
    }

    fn subscribe_to_auth_state(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    fn current_auth_state(&self) -> AuthState {
        self.state.borrow().clone()
    }
}
