use std::sync::Arc;

use tracing::{info_span, Instrument};

use nt_core::goals::GoalFormInput;
use nt_core::UserSettings;

use super::SettingsError;
use crate::usecases::auth_watcher::AuthStateWatcher;
use crate::usecases::profile_sync::ProfileSync;

/// Fetch the stored settings of the signed-in user, if any.
pub struct LoadSettings {
    watcher: Arc<AuthStateWatcher>,
    profiles: Arc<ProfileSync>,
}

impl LoadSettings {
    pub fn new(watcher: Arc<AuthStateWatcher>, profiles: Arc<ProfileSync>) -> Self {
        Self { watcher, profiles }
    }

    pub async fn execute(&self) -> Result<Option<UserSettings>, SettingsError> {
        let span = info_span!("usecase.load_settings.execute");
        async {
            let uid = self
                .watcher
                .require_uid()
                .map_err(|_| SettingsError::NotSignedIn)?;
            Ok(self.profiles.fetch_settings(&uid).await?)
        }
        .instrument(span)
        .await
    }
}

/// Form contents that reproduce `settings`.
pub fn prefill_form(settings: &UserSettings) -> GoalFormInput {
    GoalFormInput {
        height: settings.height.to_string(),
        weight: settings.weight.to_string(),
        age: settings.age.to_string(),
        activity: settings.activity.as_str().to_string(),
        gender: settings.gender.as_str().to_string(),
    }
}
