//! Device-local preferences
//! 本地偏好设置
//!
//! Thin accessor over the `isRegistered` hint and the cached username.
//! Storage failures never propagate: reads degrade to "unknown", writes are
//! logged and dropped.

use std::sync::Arc;

use tracing::{debug, warn};

use nt_core::ports::KeyValueStorePort;
use nt_core::preferences::{LocalFlag, IS_REGISTERED_KEY, USER_NAME_KEY};

pub struct LocalPreferences {
    store: Arc<dyn KeyValueStorePort>,
}

impl LocalPreferences {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }

    /// Read both keys.
    ///
    /// A missing `isRegistered` key reads as `Some(false)`; a storage error
    /// reads as `None` so the gate can fall through to identity.
    pub async fn read_flag(&self) -> LocalFlag {
        let is_registered = match self.store.get_item(IS_REGISTERED_KEY).await {
            Ok(raw) => Some(LocalFlag::parse_registered(raw.as_deref())),
            Err(err) => {
                warn!(error = %err, key = IS_REGISTERED_KEY, "local flag unavailable");
                None
            }
        };

        let cached_username = self.cached_username().await;

        LocalFlag {
            is_registered,
            cached_username,
        }
    }

    pub async fn cached_username(&self) -> Option<String> {
        match self.store.get_item(USER_NAME_KEY).await {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, key = USER_NAME_KEY, "cached username unavailable");
                None
            }
        }
    }

    /// Returns whether the write went through.
    pub async fn mark_registered(&self, registered: bool) -> bool {
        match self
            .store
            .set_item(IS_REGISTERED_KEY, LocalFlag::encode_registered(registered))
            .await
        {
            Ok(()) => {
                debug!(registered, "persisted registration flag");
                true
            }
            Err(err) => {
                warn!(error = %err, registered, "failed to persist registration flag");
                false
            }
        }
    }

    pub async fn cache_username(&self, username: &str) -> bool {
        match self.store.set_item(USER_NAME_KEY, username).await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "failed to cache username");
                false
            }
        }
    }

    /// Remove both keys. Each removal is attempted even if the other fails.
    pub async fn clear(&self) -> bool {
        let mut cleared = true;
        for key in [IS_REGISTERED_KEY, USER_NAME_KEY] {
            if let Err(err) = self.store.remove_item(key).await {
                warn!(error = %err, key, "failed to remove local preference");
                cleared = false;
            }
        }
        cleared
    }
}
