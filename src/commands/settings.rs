use serde::Serialize;
use tracing::{info_span, Instrument};

use nt_app::usecases::settings::prefill_form;
use nt_core::goals::GoalFormInput;
use nt_core::{DailyGoals, UserSettings};

use super::error::{map_err, CommandError};
use crate::bootstrap::AppRuntime;

/// What the settings screen shows on open.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub form: GoalFormInput,
    pub goals: Option<DailyGoals>,
}

impl SettingsView {
    fn from_saved(saved: Option<UserSettings>) -> Self {
        match saved {
            Some(settings) => Self {
                form: prefill_form(&settings),
                goals: Some(DailyGoals {
                    daily_calories: settings.daily_calories,
                    daily_water_ml: settings.daily_water,
                }),
            },
            None => Self {
                form: GoalFormInput::default(),
                goals: None,
            },
        }
    }
}

pub fn calculate_goals(
    runtime: &AppRuntime,
    input: &GoalFormInput,
) -> Result<DailyGoals, CommandError> {
    let _span = info_span!("command.settings.calculate").entered();
    runtime
        .usecases()
        .calculate_goals()
        .execute(input)
        .map_err(map_err)
}

pub async fn load_settings(runtime: &AppRuntime) -> Result<SettingsView, CommandError> {
    let span = info_span!("command.settings.load");
    let saved = runtime
        .usecases()
        .load_settings()
        .execute()
        .instrument(span)
        .await
        .map_err(map_err)?;
    Ok(SettingsView::from_saved(saved))
}

pub async fn save_settings(
    runtime: &AppRuntime,
    input: &GoalFormInput,
) -> Result<UserSettings, CommandError> {
    let span = info_span!("command.settings.save");
    runtime
        .usecases()
        .save_settings()
        .execute(input)
        .instrument(span)
        .await
        .map_err(map_err)
}
