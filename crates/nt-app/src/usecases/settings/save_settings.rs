use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use nt_core::goals::GoalFormInput;
use nt_core::ports::ClockPort;
use nt_core::{GoalForm, UserSettings};

use super::SettingsError;
use crate::usecases::auth_watcher::AuthStateWatcher;
use crate::usecases::profile_sync::ProfileSync;

/// Compute goals from the form and replace `user_settings/{uid}`.
///
/// ## Behavior / 行为
/// - Invalid input is rejected before any write
/// - The stored document is replaced, never merged
pub struct SaveSettings {
    watcher: Arc<AuthStateWatcher>,
    profiles: Arc<ProfileSync>,
    clock: Arc<dyn ClockPort>,
}

impl SaveSettings {
    pub fn new(
        watcher: Arc<AuthStateWatcher>,
        profiles: Arc<ProfileSync>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            watcher,
            profiles,
            clock,
        }
    }

    pub async fn execute(&self, input: &GoalFormInput) -> Result<UserSettings, SettingsError> {
        let span = info_span!("usecase.save_settings.execute");
        async {
            let form = GoalForm::parse(input)?;
            let goals = form.goals()?;
            let uid = self
                .watcher
                .require_uid()
                .map_err(|_| SettingsError::NotSignedIn)?;

            let settings = UserSettings::from_goals(uid.clone(), &form, goals, self.clock.now_utc());
            self.profiles.save_settings(&uid, &settings).await?;

            info!(
                %uid,
                daily_calories = settings.daily_calories,
                daily_water = settings.daily_water,
                "settings saved"
            );
            Ok(settings)
        }
        .instrument(span)
        .await
    }
}
