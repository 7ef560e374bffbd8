use std::sync::Arc;

use tracing::{info_span, Instrument};

use nt_core::session::SessionEvent;

use crate::usecases::auth_watcher::AuthStateWatcher;
use crate::usecases::navigation::NavigationGate;
use crate::usecases::profile_sync::{AccountDeletionError, DeletionStep, ProfileSync};

/// Delete the signed-in account and all of its documents.
///
/// ## Behavior / 行为
/// - Deletes profile, settings and identity in that order, no rollback
/// - Only a complete deletion resets the gate to guest
/// - A stale login is reported as "log in again and retry"
pub struct DeleteAccount {
    watcher: Arc<AuthStateWatcher>,
    profiles: Arc<ProfileSync>,
    gate: Arc<NavigationGate>,
}

impl DeleteAccount {
    pub fn new(
        watcher: Arc<AuthStateWatcher>,
        profiles: Arc<ProfileSync>,
        gate: Arc<NavigationGate>,
    ) -> Self {
        Self {
            watcher,
            profiles,
            gate,
        }
    }

    pub async fn execute(&self) -> Result<(), AccountDeletionError> {
        let span = info_span!("usecase.delete_account.execute");
        async {
            let uid = self
                .watcher
                .require_uid()
                .map_err(|err| AccountDeletionError::Failed {
                    failed: DeletionStep::Profile,
                    reason: err.to_string(),
                })?;

            self.profiles.delete_account_data(&uid).await?;
            self.gate.dispatch(SessionEvent::AccountDeleted).await;
            Ok(())
        }
        .instrument(span)
        .await
    }
}
