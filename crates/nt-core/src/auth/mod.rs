//! Identity as reported by the authentication service.
//!
//! The core never mutates identity, it only observes [`AuthState`] values
//! delivered through [`AuthServicePort`](crate::ports::AuthServicePort).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::Uid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: Uid,
    pub email: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<Uid>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
        }
    }
}

/// Current session as seen through the identity stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthState {
    /// The service has not resolved its persisted session yet.
    Unknown,
    SignedOut,
    SignedIn(Identity),
}

impl AuthState {
    pub fn uid(&self) -> Option<&Uid> {
        match self {
            AuthState::SignedIn(identity) => Some(&identity.uid),
            _ => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthState::SignedIn(_))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, AuthState::Unknown)
    }
}

/// Email/password pair submitted from the register/login screen.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("a@b.c", "hunter22");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("a@b.c"));
        assert!(!printed.contains("hunter22"));
    }

    #[test]
    fn auth_state_accessors() {
        let signed_in = AuthState::SignedIn(Identity::new("u-1", None));
        assert_eq!(signed_in.uid(), Some(&Uid::from("u-1")));
        assert!(signed_in.is_signed_in());
        assert!(!AuthState::Unknown.is_known());
        assert!(AuthState::SignedOut.is_known());
        assert_eq!(AuthState::SignedOut.uid(), None);
    }
}
