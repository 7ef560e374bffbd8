use std::fmt;

use nt_app::usecases::{AccountDeletionError, ProfileSetupError, SessionError, SettingsError};
use nt_core::{GoalValidationError, Route};
use serde::Serialize;

/// Error surfaced to the presentation layer: a message fit for an alert,
/// plus the screen to send the user to when one applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub message: String,
    pub route_hint: Option<Route>,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            route_hint: None,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandError {}

impl From<SessionError> for CommandError {
    fn from(err: SessionError) -> Self {
        Self {
            message: err.user_message(),
            route_hint: err.route_hint(),
        }
    }
}

impl From<AccountDeletionError> for CommandError {
    fn from(err: AccountDeletionError) -> Self {
        Self {
            message: err.user_message(),
            route_hint: err.route_hint(),
        }
    }
}

impl From<ProfileSetupError> for CommandError {
    fn from(err: ProfileSetupError) -> Self {
        Self::new(err.user_message())
    }
}

impl From<SettingsError> for CommandError {
    fn from(err: SettingsError) -> Self {
        Self::new(err.user_message())
    }
}

impl From<GoalValidationError> for CommandError {
    fn from(err: GoalValidationError) -> Self {
        Self::new(err.to_string())
    }
}

/// Centralized error mapping for commands.
pub fn map_err<E: Into<CommandError>>(err: E) -> CommandError {
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nt_app::usecases::DeletionStep;
    use nt_core::ports::AuthError;

    #[test]
    fn test_reauth_deletion_carries_route_hint() {
        let err = map_err(AccountDeletionError::ReauthenticateAndRetry {
            removed: vec![DeletionStep::Profile, DeletionStep::Settings],
        });

        assert_eq!(err.route_hint, Some(Route::RegisterLogin));
        assert!(err.message.contains("log in again"));
    }

    #[test]
    fn test_auth_error_uses_user_message() {
        let err = map_err(SessionError::Auth(AuthError::InvalidCredentials));

        assert_eq!(err.message, "Invalid email or password.");
        assert_eq!(err.route_hint, None);
    }

    #[test]
    fn test_setup_error_message() {
        let err = map_err(ProfileSetupError::UsernameRequired);

        assert_eq!(err.to_string(), "Please fill in all fields");
    }
}
