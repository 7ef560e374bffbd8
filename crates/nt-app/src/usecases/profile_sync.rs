//! Remote profile and settings documents
//! 远程资料与设置文档同步
//!
//! Every call is keyed by an explicit uid. Nothing here is cached locally
//! and nothing is retried; failures are handed back to the caller.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, info_span, warn, Instrument};

use nt_core::ports::{
    from_document, to_document, AuthError, AuthServicePort, ClockPort, DocumentStoreError,
    DocumentStorePort,
};
use nt_core::profile::{USERS_COLLECTION, USER_SETTINGS_COLLECTION};
use nt_core::{ProfilePatch, Route, Uid, UserProfile, UserSettings};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("failed to read {collection}: {source}")]
    Read {
        collection: &'static str,
        #[source]
        source: DocumentStoreError,
    },
    #[error("failed to write {collection}: {source}")]
    Write {
        collection: &'static str,
        #[source]
        source: DocumentStoreError,
    },
}

impl SyncError {
    pub fn user_message(&self) -> String {
        match self {
            SyncError::Read { source, .. } => format!("Could not load your data: {source}"),
            SyncError::Write { source, .. } => {
                format!("There was an issue saving your data: {source}")
            }
        }
    }
}

/// One step of account deletion, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionStep {
    Profile,
    Settings,
    Identity,
}

impl fmt::Display for DeletionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeletionStep::Profile => "profile",
            DeletionStep::Settings => "settings",
            DeletionStep::Identity => "identity",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountDeletionError {
    /// The first step failed; nothing was removed.
    #[error("account deletion failed at {failed}: {reason}")]
    Failed { failed: DeletionStep, reason: String },

    /// Some data is already gone. Earlier steps are not rolled back.
    #[error("account partially deleted (removed {removed:?}), failed at {failed}: {reason}")]
    Partial {
        removed: Vec<DeletionStep>,
        failed: DeletionStep,
        reason: String,
    },

    /// The identity delete needs a fresh login. Documents are already gone.
    #[error("recent login required to finish account deletion (removed {removed:?})")]
    ReauthenticateAndRetry { removed: Vec<DeletionStep> },
}

impl AccountDeletionError {
    pub fn removed(&self) -> &[DeletionStep] {
        match self {
            AccountDeletionError::Failed { .. } => &[],
            AccountDeletionError::Partial { removed, .. }
            | AccountDeletionError::ReauthenticateAndRetry { removed } => removed,
        }
    }

    /// Screen the user should be sent to, if any.
    pub fn route_hint(&self) -> Option<Route> {
        match self {
            AccountDeletionError::ReauthenticateAndRetry { .. } => Some(Route::RegisterLogin),
            _ => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            AccountDeletionError::Failed { reason, .. } => {
                format!("Your account could not be deleted: {reason}")
            }
            AccountDeletionError::Partial { removed, reason, .. } => {
                let removed: Vec<String> = removed.iter().map(ToString::to_string).collect();
                format!(
                    "Your account was only partly deleted ({} removed): {reason}",
                    removed.join(", ")
                )
            }
            AccountDeletionError::ReauthenticateAndRetry { .. } => {
                "Your data was removed. Please log in again to finish deleting your account."
                    .to_string()
            }
        }
    }
}

/// Reads and writes the `users` and `user_settings` documents.
///
/// ## Behavior / 行为
/// - Profile saves merge; settings saves replace
/// - Missing documents read as `Ok(None)`
/// - Account deletion runs profile, settings, identity and stops at the first failure
pub struct ProfileSync {
    documents: Arc<dyn DocumentStorePort>,
    auth: Arc<dyn AuthServicePort>,
    clock: Arc<dyn ClockPort>,
}

impl ProfileSync {
    pub fn new(
        documents: Arc<dyn DocumentStorePort>,
        auth: Arc<dyn AuthServicePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            documents,
            auth,
            clock,
        }
    }

    pub async fn fetch_profile(&self, uid: &Uid) -> Result<Option<UserProfile>, SyncError> {
        let read_err = |source: DocumentStoreError| SyncError::Read {
            collection: USERS_COLLECTION,
            source,
        };

        let Some(mut doc) = self
            .documents
            .get(USERS_COLLECTION, uid.as_ref())
            .await
            .map_err(read_err)?
        else {
            return Ok(None);
        };

        // Documents written by setup alone carry no uid field.
        doc.entry("uid")
            .or_insert_with(|| Value::String(uid.to_string()));
        from_document(doc).map(Some).map_err(read_err)
    }

    /// Write the partial profile created at registration.
    pub async fn create_profile(
        &self,
        uid: &Uid,
        email: Option<String>,
    ) -> Result<UserProfile, SyncError> {
        let profile = UserProfile::registered(uid.clone(), email, self.clock.now_utc());
        let doc = to_document(&profile).map_err(|source| SyncError::Write {
            collection: USERS_COLLECTION,
            source,
        })?;

        self.documents
            .set(USERS_COLLECTION, uid.as_ref(), doc, false)
            .await
            .map_err(|source| SyncError::Write {
                collection: USERS_COLLECTION,
                source,
            })?;
        Ok(profile)
    }

    /// Merge `patch` into the profile document.
    pub async fn save_profile(&self, uid: &Uid, patch: &ProfilePatch) -> Result<(), SyncError> {
        let write_err = |source: DocumentStoreError| SyncError::Write {
            collection: USERS_COLLECTION,
            source,
        };
        let doc = to_document(patch).map_err(write_err)?;
        self.documents
            .set(USERS_COLLECTION, uid.as_ref(), doc, true)
            .await
            .map_err(write_err)
    }

    pub async fn fetch_settings(&self, uid: &Uid) -> Result<Option<UserSettings>, SyncError> {
        let read_err = |source: DocumentStoreError| SyncError::Read {
            collection: USER_SETTINGS_COLLECTION,
            source,
        };
        match self
            .documents
            .get(USER_SETTINGS_COLLECTION, uid.as_ref())
            .await
            .map_err(read_err)?
        {
            Some(doc) => from_document(doc).map(Some).map_err(read_err),
            None => Ok(None),
        }
    }

    /// Replace the settings document with `settings`.
    pub async fn save_settings(&self, uid: &Uid, settings: &UserSettings) -> Result<(), SyncError> {
        let write_err = |source: DocumentStoreError| SyncError::Write {
            collection: USER_SETTINGS_COLLECTION,
            source,
        };
        let doc = to_document(settings).map_err(write_err)?;
        self.documents
            .set(USER_SETTINGS_COLLECTION, uid.as_ref(), doc, false)
            .await
            .map_err(write_err)
    }

    /// Delete profile, settings and identity, in that order.
    pub async fn delete_account_data(&self, uid: &Uid) -> Result<(), AccountDeletionError> {
        let span = info_span!("usecase.profile_sync.delete_account_data", uid = %uid);
        async {
            let mut removed = Vec::new();

            for (step, collection) in [
                (DeletionStep::Profile, USERS_COLLECTION),
                (DeletionStep::Settings, USER_SETTINGS_COLLECTION),
            ] {
                if let Err(err) = self.documents.delete(collection, uid.as_ref()).await {
                    warn!(error = %err, %step, "account deletion step failed");
                    return Err(stopped_at(removed, step, err.to_string()));
                }
                info!(%step, "account deletion step completed");
                removed.push(step);
            }

            match self.auth.delete_current_user().await {
                Ok(()) => {
                    info!("account deleted");
                    Ok(())
                }
                Err(AuthError::RequiresRecentLogin) => {
                    warn!("identity delete requires a recent login");
                    Err(AccountDeletionError::ReauthenticateAndRetry { removed })
                }
                Err(err) => {
                    warn!(error = %err, "identity delete failed");
                    Err(stopped_at(removed, DeletionStep::Identity, err.to_string()))
                }
            }
        }
        .instrument(span)
        .await
    }
}

fn stopped_at(removed: Vec<DeletionStep>, failed: DeletionStep, reason: String) -> AccountDeletionError {
    if removed.is_empty() {
        AccountDeletionError::Failed { failed, reason }
    } else {
        AccountDeletionError::Partial {
            removed,
            failed,
            reason,
        }
    }
}
