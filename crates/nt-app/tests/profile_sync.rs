//! Document reads, merge/replace writes and ordered account deletion.

mod common;

use common::{fixed_time, Harness};
use nt_app::usecases::{AccountDeletionError, DeleteAccount, DeletionStep, SyncError};
use nt_core::ports::{AuthServicePort, DocumentStoreError, DocumentStorePort};
use nt_core::session::SessionPhase;
use nt_core::{ActivityLevel, AuthState, Credentials, ProfilePatch, Route, Sex, Uid, UserSettings};
use nt_infra::memory::StoreOperation;
use serde_json::json;

fn settings_for(uid: &Uid) -> UserSettings {
    UserSettings {
        uid: uid.clone(),
        height: 175.0,
        weight: 70.0,
        age: 25,
        activity: ActivityLevel::Moderate,
        gender: Sex::Male,
        daily_calories: 2672,
        daily_water: 2450,
        timestamp: fixed_time(),
    }
}

async fn signed_up(h: &Harness) -> Uid {
    let identity = h
        .auth
        .register_with_credentials(&Credentials::new("ada@example.com", "secret1"))
        .await
        .unwrap();
    identity.uid
}

#[tokio::test]
async fn missing_documents_read_as_none() {
    let h = Harness::new();
    let uid = Uid::from("nobody");

    assert_eq!(h.profiles.fetch_profile(&uid).await.unwrap(), None);
    assert_eq!(h.profiles.fetch_settings(&uid).await.unwrap(), None);
}

#[tokio::test]
async fn read_failures_name_the_collection() {
    let h = Harness::new();
    h.documents.fail_on(StoreOperation::Get, "user_settings").await;

    let err = h
        .profiles
        .fetch_settings(&Uid::from("u-1"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SyncError::Read {
            collection: "user_settings",
            source: DocumentStoreError::Unavailable(_),
        }
    ));
}

#[tokio::test]
async fn profile_save_merges_into_registration_document() {
    let h = Harness::new();
    let uid = Uid::from("u-1");
    h.profiles
        .create_profile(&uid, Some("ada@example.com".to_string()))
        .await
        .unwrap();

    h.profiles
        .save_profile(&uid, &ProfilePatch::username("Ada"))
        .await
        .unwrap();

    let profile = h.profiles.fetch_profile(&uid).await.unwrap().unwrap();
    assert_eq!(profile.uid, uid);
    assert_eq!(profile.username.as_deref(), Some("Ada"));
    assert_eq!(profile.email.as_deref(), Some("ada@example.com"));
    assert_eq!(profile.created_at, Some(fixed_time()));
}

#[tokio::test]
async fn profile_written_by_setup_alone_still_reads_with_uid() {
    let h = Harness::new();
    let uid = Uid::from("u-2");

    h.profiles
        .save_profile(&uid, &ProfilePatch::username("Bo"))
        .await
        .unwrap();

    let profile = h.profiles.fetch_profile(&uid).await.unwrap().unwrap();
    assert_eq!(profile.uid, uid);
    assert_eq!(profile.username.as_deref(), Some("Bo"));
    assert_eq!(profile.email, None);
}

#[tokio::test]
async fn settings_save_replaces_the_whole_document() {
    let h = Harness::new();
    let uid = Uid::from("u-1");
    let stale = json!({ "uid": "u-1", "legacyField": true, "height": 160.0 });
    h.documents
        .set("user_settings", "u-1", stale.as_object().unwrap().clone(), false)
        .await
        .unwrap();

    let settings = settings_for(&uid);
    h.profiles.save_settings(&uid, &settings).await.unwrap();

    let raw = h.documents.get("user_settings", "u-1").await.unwrap().unwrap();
    assert!(!raw.contains_key("legacyField"));
    assert_eq!(raw.get("dailyCalories"), Some(&json!(2672)));
    assert_eq!(
        h.profiles.fetch_settings(&uid).await.unwrap(),
        Some(settings)
    );
}

#[tokio::test]
async fn deletion_removes_everything_in_order() {
    let h = Harness::new();
    let uid = signed_up(&h).await;
    h.profiles.create_profile(&uid, None).await.unwrap();
    h.profiles
        .save_settings(&uid, &settings_for(&uid))
        .await
        .unwrap();

    h.profiles.delete_account_data(&uid).await.unwrap();

    assert!(!h.documents.contains("users", uid.as_ref()).await);
    assert!(!h.documents.contains("user_settings", uid.as_ref()).await);
    assert!(!h.auth.account_exists("ada@example.com").await);
    assert_eq!(h.auth.current_auth_state(), AuthState::SignedOut);
}

#[tokio::test]
async fn deletion_failing_first_step_removes_nothing() {
    let h = Harness::new();
    let uid = signed_up(&h).await;
    h.profiles.create_profile(&uid, None).await.unwrap();
    h.documents.fail_on(StoreOperation::Delete, "users").await;

    let err = h.profiles.delete_account_data(&uid).await.unwrap_err();

    assert!(matches!(
        err,
        AccountDeletionError::Failed {
            failed: DeletionStep::Profile,
            ..
        }
    ));
    assert!(err.removed().is_empty());
    assert!(h.documents.contains("users", uid.as_ref()).await);
    assert!(h.auth.account_exists("ada@example.com").await);
}

#[tokio::test]
async fn deletion_reports_partial_progress() {
    let h = Harness::new();
    let uid = signed_up(&h).await;
    h.profiles.create_profile(&uid, None).await.unwrap();
    h.profiles
        .save_settings(&uid, &settings_for(&uid))
        .await
        .unwrap();
    h.documents
        .fail_on(StoreOperation::Delete, "user_settings")
        .await;

    let err = h.profiles.delete_account_data(&uid).await.unwrap_err();

    match &err {
        AccountDeletionError::Partial {
            removed, failed, ..
        } => {
            assert_eq!(removed, &vec![DeletionStep::Profile]);
            assert_eq!(*failed, DeletionStep::Settings);
        }
        other => panic!("expected partial deletion, got {other:?}"),
    }
    assert!(!h.documents.contains("users", uid.as_ref()).await);
    assert!(h.documents.contains("user_settings", uid.as_ref()).await);
    assert!(h.auth.account_exists("ada@example.com").await);
    assert!(err.user_message().contains("profile"));
}

#[tokio::test]
async fn deletion_needing_recent_login_asks_to_reauthenticate() {
    let h = Harness::new();
    let uid = signed_up(&h).await;
    h.profiles.create_profile(&uid, None).await.unwrap();
    h.auth.set_requires_recent_login(true);

    let err = h.profiles.delete_account_data(&uid).await.unwrap_err();

    assert_eq!(
        err,
        AccountDeletionError::ReauthenticateAndRetry {
            removed: vec![DeletionStep::Profile, DeletionStep::Settings],
        }
    );
    assert_eq!(err.route_hint(), Some(Route::RegisterLogin));
    assert!(h.auth.account_exists("ada@example.com").await);
}

#[tokio::test]
async fn delete_account_signs_out_the_gate() {
    let h = Harness::new();
    let _session = h.start().await;
    let uid = signed_up(&h).await;
    h.wait_until(|s| matches!(s.phase, SessionPhase::AuthenticatedIncomplete { .. }))
        .await;

    DeleteAccount::new(h.watcher.clone(), h.profiles.clone(), h.gate.clone())
        .execute()
        .await
        .unwrap();

    let state = h
        .wait_until(|s| s.phase == SessionPhase::Guest { continued: false })
        .await;
    assert_eq!(state.identity, AuthState::SignedOut);
    assert!(!h.documents.contains("users", uid.as_ref()).await);
    assert_eq!(h.cached_username().await, None);
}

#[tokio::test]
async fn delete_account_requires_a_signed_in_user() {
    let h = Harness::new();

    let err = DeleteAccount::new(h.watcher.clone(), h.profiles.clone(), h.gate.clone())
        .execute()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AccountDeletionError::Failed {
            failed: DeletionStep::Profile,
            ..
        }
    ));
}

#[tokio::test]
async fn failed_deletion_keeps_the_session() {
    let h = Harness::new();
    let _session = h.start().await;
    signed_up(&h).await;
    let before = h
        .wait_until(|s| matches!(s.phase, SessionPhase::AuthenticatedIncomplete { .. }))
        .await;
    h.auth.set_requires_recent_login(true);

    let err = DeleteAccount::new(h.watcher.clone(), h.profiles.clone(), h.gate.clone())
        .execute()
        .await
        .unwrap_err();

    assert_eq!(err.route_hint(), Some(Route::RegisterLogin));
    assert_eq!(h.gate.current().await.phase, before.phase);
}
