use serde::{Deserialize, Serialize};

use nt_core::{Identity, Uid};

/// Signed-in session persisted in the key/value store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredSession {
    pub uid: Uid,
    pub email: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
    /// Unix millis after which `id_token` must be refreshed.
    pub expires_at_ms: i64,
}

impl StoredSession {
    pub fn identity(&self) -> Identity {
        Identity::new(self.uid.clone(), self.email.clone())
    }

    /// True when the token expires within `margin_ms` of `now_ms`.
    pub fn expires_within(&self, now_ms: i64, margin_ms: i64) -> bool {
        self.expires_at_ms - margin_ms <= now_ms
    }
}

/// Parse `expiresIn` (seconds, sent as a string).
pub(crate) fn expires_at(now_ms: i64, expires_in: &str) -> i64 {
    let secs: i64 = expires_in.trim().parse().unwrap_or(0);
    now_ms + secs * 1000
}
