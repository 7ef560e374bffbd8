use nt_core::ports::{AuthError, DocumentStoreError};
use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

/// Pull the error message out of a failed response body.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Map an Identity Toolkit error code such as `"WEAK_PASSWORD : Password
/// should be at least 6 characters"` to [`AuthError`].
pub(crate) fn map_auth_error(message: &str) -> AuthError {
    let code = message
        .split(|c: char| c == ':' || c.is_whitespace())
        .next()
        .unwrap_or_default();

    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            AuthError::InvalidCredentials
        }
        "EMAIL_EXISTS" => AuthError::EmailAlreadyInUse,
        "WEAK_PASSWORD" => AuthError::WeakPassword,
        "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" | "TOKEN_EXPIRED" | "INVALID_ID_TOKEN" => {
            AuthError::RequiresRecentLogin
        }
        "USER_NOT_FOUND" | "USER_DISABLED" => AuthError::UserNotFound,
        _ => AuthError::Service(message.to_string()),
    }
}

pub(crate) fn transport_auth_error(err: reqwest::Error) -> AuthError {
    AuthError::Network(err.to_string())
}

pub(crate) fn map_store_status(status: StatusCode, body: &str) -> DocumentStoreError {
    let message = error_message(body);
    match status {
        StatusCode::UNAUTHORIZED => DocumentStoreError::Unauthenticated,
        StatusCode::FORBIDDEN => DocumentStoreError::PermissionDenied,
        s if s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS => {
            DocumentStoreError::Unavailable(message)
        }
        s => DocumentStoreError::Rejected {
            status: s.as_u16(),
            message,
        },
    }
}

pub(crate) fn transport_store_error(err: reqwest::Error) -> DocumentStoreError {
    DocumentStoreError::Unavailable(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_with_details_are_recognized() {
        assert_eq!(
            map_auth_error("WEAK_PASSWORD : Password should be at least 6 characters"),
            AuthError::WeakPassword
        );
        assert_eq!(
            map_auth_error("INVALID_LOGIN_CREDENTIALS"),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            map_auth_error("CREDENTIAL_TOO_OLD_LOGIN_AGAIN"),
            AuthError::RequiresRecentLogin
        );
    }

    #[test]
    fn unknown_codes_are_kept_verbatim() {
        assert_eq!(
            map_auth_error("TOO_MANY_ATTEMPTS_TRY_LATER"),
            AuthError::Service("TOO_MANY_ATTEMPTS_TRY_LATER".into())
        );
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(
            error_message(r#"{"error":{"code":400,"message":"EMAIL_EXISTS"}}"#),
            "EMAIL_EXISTS"
        );
        assert_eq!(error_message("bad gateway\n"), "bad gateway");
    }

    #[test]
    fn store_status_mapping() {
        assert_eq!(
            map_store_status(StatusCode::FORBIDDEN, ""),
            DocumentStoreError::PermissionDenied
        );
        assert!(matches!(
            map_store_status(StatusCode::SERVICE_UNAVAILABLE, ""),
            DocumentStoreError::Unavailable(_)
        ));
        assert_eq!(
            map_store_status(
                StatusCode::BAD_REQUEST,
                r#"{"error":{"code":400,"message":"bad field","status":"INVALID_ARGUMENT"}}"#
            ),
            DocumentStoreError::Rejected {
                status: 400,
                message: "bad field".into()
            }
        );
    }
}
