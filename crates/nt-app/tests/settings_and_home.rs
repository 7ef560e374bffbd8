//! Settings screen, greeting and footer routing.

mod common;

use common::{fixed_time, Harness};
use nt_app::usecases::settings::prefill_form;
use nt_app::usecases::{
    CalculateGoals, FooterRouting, FooterTab, LoadGreeting, LoadSettings, SaveSettings,
    SettingsError,
};
use nt_core::goals::{GoalField, GoalFormInput};
use nt_core::ports::{AuthServicePort, KeyValueStorePort};
use nt_core::preferences::USER_NAME_KEY;
use nt_core::{ActivityLevel, Credentials, DailyGoals, GoalValidationError, ProfilePatch, Route};

fn form(height: &str, weight: &str, age: &str, activity: &str, gender: &str) -> GoalFormInput {
    GoalFormInput {
        height: height.to_string(),
        weight: weight.to_string(),
        age: age.to_string(),
        activity: activity.to_string(),
        gender: gender.to_string(),
    }
}

async fn sign_up(h: &Harness) -> nt_core::Uid {
    h.auth
        .register_with_credentials(&Credentials::new("ada@example.com", "secret1"))
        .await
        .unwrap()
        .uid
}

#[test]
fn calculator_matches_worked_example() {
    let goals = CalculateGoals::new()
        .execute(&form("175", "70", "25", "moderate", "male"))
        .unwrap();

    assert_eq!(
        goals,
        DailyGoals {
            daily_calories: 2672,
            daily_water_ml: 2450,
        }
    );
}

#[test]
fn calculator_rejects_missing_numbers() {
    let err = CalculateGoals::new()
        .execute(&form("175", "", "25", "moderate", "male"))
        .unwrap_err();

    assert_eq!(err, GoalValidationError::NotANumber(GoalField::Weight));
}

#[tokio::test]
async fn saved_settings_reload_into_the_form() {
    let h = Harness::new();
    let uid = sign_up(&h).await;
    let input = form("175", "70", "25", "moderate", "male");

    let saved = SaveSettings::new(h.watcher.clone(), h.profiles.clone(), h.clock.clone())
        .execute(&input)
        .await
        .unwrap();

    assert_eq!(saved.uid, uid);
    assert_eq!(saved.daily_calories, 2672);
    assert_eq!(saved.daily_water, 2450);
    assert_eq!(saved.activity, ActivityLevel::Moderate);
    assert_eq!(saved.timestamp, fixed_time());

    let loaded = LoadSettings::new(h.watcher.clone(), h.profiles.clone())
        .execute()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(prefill_form(&loaded), input);
}

#[tokio::test]
async fn saving_settings_requires_sign_in() {
    let h = Harness::new();

    let err = SaveSettings::new(h.watcher.clone(), h.profiles.clone(), h.clock.clone())
        .execute(&form("175", "70", "25", "moderate", "male"))
        .await
        .unwrap_err();

    assert_eq!(err, SettingsError::NotSignedIn);
}

#[tokio::test]
async fn invalid_form_is_not_saved() {
    let h = Harness::new();
    let uid = sign_up(&h).await;

    let err = SaveSettings::new(h.watcher.clone(), h.profiles.clone(), h.clock.clone())
        .execute(&form("tall", "70", "25", "moderate", "male"))
        .await
        .unwrap_err();

    assert!(matches!(err, SettingsError::Validation(_)));
    assert!(!h.documents.contains("user_settings", uid.as_ref()).await);
}

#[tokio::test]
async fn load_settings_without_document_is_empty() {
    let h = Harness::new();
    sign_up(&h).await;

    let loaded = LoadSettings::new(h.watcher.clone(), h.profiles.clone())
        .execute()
        .await
        .unwrap();

    assert_eq!(loaded, None);
}

#[tokio::test]
async fn greeting_falls_back_to_user() {
    let h = Harness::new();

    let name = LoadGreeting::new(h.watcher.clone(), h.profiles.clone(), h.preferences.clone())
        .execute()
        .await;

    assert_eq!(name, "User");
}

#[tokio::test]
async fn greeting_uses_cached_name_when_signed_out() {
    let h = Harness::new();
    h.key_value.set_item(USER_NAME_KEY, "Ada").await.unwrap();

    let name = LoadGreeting::new(h.watcher.clone(), h.profiles.clone(), h.preferences.clone())
        .execute()
        .await;

    assert_eq!(name, "Ada");
}

#[tokio::test]
async fn greeting_reads_profile_and_refreshes_cache() {
    let h = Harness::new();
    let uid = sign_up(&h).await;
    h.profiles
        .save_profile(&uid, &ProfilePatch::username("Grace"))
        .await
        .unwrap();

    let name = LoadGreeting::new(h.watcher.clone(), h.profiles.clone(), h.preferences.clone())
        .execute()
        .await;

    assert_eq!(name, "Grace");
    assert_eq!(h.cached_username().await.as_deref(), Some("Grace"));
}

#[tokio::test]
async fn footer_profile_tab_depends_on_sign_in() {
    let h = Harness::new();
    let footer = FooterRouting::new(h.watcher.clone());

    assert_eq!(footer.target(FooterTab::Home), Route::Home);
    assert_eq!(footer.target(FooterTab::Settings), Route::Settings);
    assert_eq!(footer.target(FooterTab::Profile), Route::RegisterLogin);

    sign_up(&h).await;

    assert_eq!(footer.target(FooterTab::Profile), Route::Profile);
}
