use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("this operation requires a recent login")]
    RequiresRecentLogin,

    #[error("user not found")]
    UserNotFound,

    #[error("email already in use")]
    EmailAlreadyInUse,

    #[error("password is too weak")]
    WeakPassword,

    #[error("no user is signed in")]
    NotSignedIn,

    #[error("network error: {0}")]
    Network(String),

    #[error("auth service error: {0}")]
    Service(String),
}

impl AuthError {
    /// Text shown to the user in an alert.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "Invalid email or password.".to_string(),
            AuthError::RequiresRecentLogin => {
                "Please log in again before deleting your account.".to_string()
            }
            AuthError::UserNotFound | AuthError::NotSignedIn => "User not found.".to_string(),
            AuthError::EmailAlreadyInUse => "That email address is already in use.".to_string(),
            AuthError::WeakPassword => "Password should be at least 6 characters.".to_string(),
            AuthError::Network(_) => "Network error. Please try again.".to_string(),
            AuthError::Service(message) => message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentStoreError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("request is not authenticated")]
    Unauthenticated,

    #[error("document store unavailable: {0}")]
    Unavailable(String),

    #[error("document store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("malformed document: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_message_is_passed_through() {
        let err = AuthError::Service("TOO_MANY_ATTEMPTS_TRY_LATER".into());
        assert_eq!(err.user_message(), "TOO_MANY_ATTEMPTS_TRY_LATER");
    }

    #[test]
    fn missing_user_reads_the_same_either_way() {
        assert_eq!(
            AuthError::NotSignedIn.user_message(),
            AuthError::UserNotFound.user_message()
        );
    }
}
