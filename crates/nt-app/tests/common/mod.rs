#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use nt_app::usecases::{AuthStateWatcher, GateSession, LocalPreferences, NavigationGate, ProfileSync};
use nt_core::ports::{ClockPort, KeyValueStorePort};
use nt_core::preferences::{IS_REGISTERED_KEY, USER_NAME_KEY};
use nt_core::SessionState;
use nt_infra::{InMemoryAuthService, InMemoryDocumentStore, InMemoryKeyValueStore};

pub struct FixedClock(pub DateTime<Utc>);

impl ClockPort for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0.timestamp_millis()
    }
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
}

/// `RUST_LOG=debug cargo test` shows gate transitions.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The app layer wired to in-memory adapters.
pub struct Harness {
    pub auth: Arc<InMemoryAuthService>,
    pub documents: Arc<InMemoryDocumentStore>,
    pub key_value: Arc<InMemoryKeyValueStore>,
    pub clock: Arc<FixedClock>,
    pub preferences: Arc<LocalPreferences>,
    pub watcher: Arc<AuthStateWatcher>,
    pub profiles: Arc<ProfileSync>,
    pub gate: Arc<NavigationGate>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_auth(InMemoryAuthService::new())
    }

    /// Identity stream stays `Unknown` until `auth.resolve` is called.
    pub fn unresolved() -> Self {
        Self::with_auth(InMemoryAuthService::unresolved())
    }

    fn with_auth(auth: InMemoryAuthService) -> Self {
        init_test_logging();
        let auth = Arc::new(auth);
        let documents = Arc::new(InMemoryDocumentStore::new());
        let key_value = Arc::new(InMemoryKeyValueStore::new());
        let clock = Arc::new(FixedClock(fixed_time()));

        let preferences = Arc::new(LocalPreferences::new(key_value.clone()));
        let watcher = Arc::new(AuthStateWatcher::new(auth.clone()));
        let profiles = Arc::new(ProfileSync::new(
            documents.clone(),
            auth.clone(),
            clock.clone(),
        ));
        let gate = Arc::new(NavigationGate::new(
            preferences.clone(),
            profiles.clone(),
            watcher.clone(),
        ));

        Self {
            auth,
            documents,
            key_value,
            clock,
            preferences,
            watcher,
            profiles,
            gate,
        }
    }

    pub async fn set_flag(&self, registered: &str) {
        self.key_value
            .set_item(IS_REGISTERED_KEY, registered)
            .await
            .unwrap();
    }

    pub async fn stored_flag(&self) -> Option<String> {
        self.key_value.get_item(IS_REGISTERED_KEY).await.unwrap()
    }

    pub async fn cached_username(&self) -> Option<String> {
        self.key_value.get_item(USER_NAME_KEY).await.unwrap()
    }

    pub async fn start(&self) -> GateSession {
        self.gate.start().await
    }

    /// Poll the gate until `predicate` holds.
    pub async fn wait_until<F>(&self, predicate: F) -> SessionState
    where
        F: Fn(&SessionState) -> bool,
    {
        let poll = async {
            loop {
                let state = self.gate.current().await;
                if predicate(&state) {
                    return state;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        };
        match tokio::time::timeout(Duration::from_secs(2), poll).await {
            Ok(state) => state,
            Err(_) => panic!(
                "gate never reached expected state, last: {:?}",
                self.gate.current().await
            ),
        }
    }
}
