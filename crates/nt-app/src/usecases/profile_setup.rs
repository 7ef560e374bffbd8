//! Use case for completing the profile after registration
//! 完成用户资料设置的用例

use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use nt_core::session::SessionEvent;
use nt_core::ProfilePatch;

use crate::usecases::auth_watcher::AuthStateWatcher;
use crate::usecases::navigation::NavigationGate;
use crate::usecases::profile_sync::{ProfileSync, SyncError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileSetupError {
    #[error("Please fill in all fields")]
    UsernameRequired,
    #[error("User not found.")]
    NotSignedIn,
    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl ProfileSetupError {
    pub fn user_message(&self) -> String {
        match self {
            ProfileSetupError::Sync(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Save the username chosen on the setup screen.
///
/// ## Behavior / 行为
/// - Rejects a blank username before touching the network
/// - Merges `{username}` into `users/{uid}`
/// - Caches the username and routes Home
pub struct CompleteProfileSetup {
    watcher: Arc<AuthStateWatcher>,
    profiles: Arc<ProfileSync>,
    gate: Arc<NavigationGate>,
}

impl CompleteProfileSetup {
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

    pub async fn execute(&self, username: &str) -> Result<(), ProfileSetupError> {
        let span = info_span!("usecase.complete_profile_setup.execute");
        async {
            let username = username.trim();
            if username.is_empty() {
                return Err(ProfileSetupError::UsernameRequired);
            }
            let uid = self
                .watcher
                .require_uid()
                .map_err(|_| ProfileSetupError::NotSignedIn)?;

            self.profiles
                .save_profile(&uid, &ProfilePatch::username(username))
                .await?;
            info!(%uid, "profile setup saved");

            self.gate
                .dispatch(SessionEvent::ProfileSetupCompleted {
                    uid,
                    username: username.to_string(),
                })
                .await;
            Ok(())
        }
        .instrument(span)
        .await
    }
}
