//! Profile and settings documents.
//!
//! Both documents are keyed by [`Uid`](crate::Uid) but live in separate
//! collections: the profile is merged field by field, the settings document
//! is replaced wholesale on every save.

mod model;
mod settings;

pub use model::{ActivityLevel, ProfilePatch, Sex, UserProfile};
pub use settings::UserSettings;

/// Collection holding [`UserProfile`] documents.
pub const USERS_COLLECTION: &str = "users";
/// Collection holding [`UserSettings`] documents.
pub const USER_SETTINGS_COLLECTION: &str = "user_settings";
