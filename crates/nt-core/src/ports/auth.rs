//! Identity service port
//!
//! The service owns the session. Callers submit credentials and observe the
//! outcome through [`AuthServicePort::subscribe_to_auth_state`]; they never
//! set the current identity themselves.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::auth::{AuthState, Credentials, Identity};

use super::errors::AuthError;

#[async_trait]
pub trait AuthServicePort: Send + Sync {
    /// Create an account and sign it in.
    async fn register_with_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Identity, AuthError>;

    async fn sign_in_with_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Identity, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Delete the signed-in identity.
    ///
    /// Fails with [`AuthError::RequiresRecentLogin`] when the service wants
    /// the user to authenticate again first.
    async fn delete_current_user(&self) -> Result<(), AuthError>;

    /// Stream of identity changes.
    ///
    /// The receiver starts at [`AuthState::Unknown`] until the service has
    /// resolved any persisted session.
    fn subscribe_to_auth_state(&self) -> watch::Receiver<AuthState>;

    fn current_auth_state(&self) -> AuthState {
        self.subscribe_to_auth_state().borrow().clone()
    }
}
