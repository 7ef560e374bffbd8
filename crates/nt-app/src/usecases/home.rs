//! Home screen greeting
//! 首页问候

use std::sync::Arc;

use tracing::{info_span, warn, Instrument};

use nt_core::AuthState;

use crate::usecases::auth_watcher::AuthStateWatcher;
use crate::usecases::preferences::LocalPreferences;
use crate::usecases::profile_sync::ProfileSync;

pub const FALLBACK_USERNAME: &str = "User";

/// Resolve the name shown in "Welcome, {name}!".
///
/// ## Behavior / 行为
/// - Signed in: the profile username, refreshing the local cache
/// - Signed out: the cached username
/// - Anything missing or failing falls back to `"User"`
pub struct LoadGreeting {
    watcher: Arc<AuthStateWatcher>,
    profiles: Arc<ProfileSync>,
    preferences: Arc<LocalPreferences>,
}

impl LoadGreeting {
    pub fn new(
        watcher: Arc<AuthStateWatcher>,
        profiles: Arc<ProfileSync>,
        preferences: Arc<LocalPreferences>,
    ) -> Self {
        Self {
            watcher,
            profiles,
            preferences,
        }
    }

    pub async fn execute(&self) -> String {
        let span = info_span!("usecase.load_greeting.execute");
        async {
            let AuthState::SignedIn(identity) = self.watcher.current() else {
                return self
                    .preferences
                    .cached_username()
                    .await
                    .unwrap_or_else(|| FALLBACK_USERNAME.to_string());
            };

            match self.profiles.fetch_profile(&identity.uid).await {
                Ok(Some(profile)) => match profile.username {
                    Some(username) => {
                        self.preferences.cache_username(&username).await;
                        username
                    }
                    None => FALLBACK_USERNAME.to_string(),
                },
                Ok(None) => FALLBACK_USERNAME.to_string(),
                Err(err) => {
                    warn!(error = %err, "failed to load username");
                    FALLBACK_USERNAME.to_string()
                }
            }
        }
        .instrument(span)
        .await
    }
}
