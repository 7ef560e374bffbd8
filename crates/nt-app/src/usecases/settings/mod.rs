//! Settings screen use cases
//! 设置页用例

mod calculate_goals;
mod load_settings;
mod save_settings;

pub use calculate_goals::CalculateGoals;
pub use load_settings::{prefill_form, LoadSettings};
pub use save_settings::SaveSettings;

use nt_core::GoalValidationError;

use crate::usecases::profile_sync::SyncError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Validation(#[from] GoalValidationError),
    #[error("User not found.")]
    NotSignedIn,
    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl SettingsError {
    pub fn user_message(&self) -> String {
        match self {
            SettingsError::Sync(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}
