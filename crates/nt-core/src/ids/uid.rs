use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque user id issued by the authentication service.
///
/// Documents in both remote collections are keyed by this value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    /// Fresh id for identity services that mint their own (the in-memory one).
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }
}

impl Default for Uid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Uid {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for Uid {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<Uid> for String {
    fn from(uid: Uid) -> Self {
        uid.0
    }
}

impl AsRef<str> for Uid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_serializes_as_plain_string() {
        let uid = Uid::from("abc123");
        assert_eq!(serde_json::to_string(&uid).unwrap(), "\"abc123\"");
        assert_eq!(uid.to_string(), "abc123");
    }

    #[test]
    fn generated_uids_are_distinct() {
        assert_ne!(Uid::new(), Uid::new());
    }
}
