//! Account intents from the register/login and profile screens
//! 账户相关用例

mod continue_as_guest;
mod delete_account;
mod logout;
mod register;
mod sign_in;

pub use continue_as_guest::ContinueAsGuest;
pub use delete_account::DeleteAccount;
pub use logout::Logout;
pub use register::RegisterAccount;
pub use sign_in::SignIn;

use nt_core::ports::AuthError;
use nt_core::Route;

use crate::usecases::profile_sync::SyncError;

/// Failure of a session-changing intent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Auth(err) => err.user_message(),
            SessionError::Sync(err) => err.user_message(),
        }
    }

    pub fn route_hint(&self) -> Option<Route> {
        match self {
            SessionError::Auth(AuthError::RequiresRecentLogin) => Some(Route::RegisterLogin),
            _ => None,
        }
    }
}
