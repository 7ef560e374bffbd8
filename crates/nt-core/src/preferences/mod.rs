//! Device-local session hint.
//!
//! The flag lets a cold start skip the login screen before the identity
//! stream has reported. It is a hint only: identity always wins once known.

use serde::{Deserialize, Serialize};

/// Key of the persisted registration hint (`"true"` / `"false"`).
pub const IS_REGISTERED_KEY: &str = "isRegistered";
/// Key of the cached display name.
pub const USER_NAME_KEY: &str = "userName";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFlag {
    /// `None` when the store could not be read.
    pub is_registered: Option<bool>,
    /// Best-effort mirror of the last known profile username.
    pub cached_username: Option<String>,
}

impl LocalFlag {
    /// Interpret the raw stored value. Only the literal `"true"` counts as
    /// registered; a missing key means not registered.
    pub fn parse_registered(raw: Option<&str>) -> bool {
        raw == Some("true")
    }

    pub fn encode_registered(value: bool) -> &'static str {
        if value {
            "true"
        } else {
            "false"
        }
    }
}
