//! # Use Case Accessor / 用例访问器
//!
//! `AppRuntime` owns the long-lived services (preferences, identity watcher,
//! profile sync, navigation gate). Commands reach use cases through
//! `runtime.usecases()`, which builds each one from those shared services.
//!
//! ## Adding a use case / 添加用例
//!
//! 1. Implement it in `nt-app` with a `new()` taking its services
//! 2. Add a method to `UseCases` that calls `new()` with the shared `Arc`s
//! 3. Call it from a command: `runtime.usecases().my_use_case().execute()`

use std::sync::Arc;

use nt_app::usecases::{
    AuthStateWatcher, CalculateGoals, CompleteProfileSetup, ContinueAsGuest, DeleteAccount,
    FooterRouting, GateSession, LoadGreeting, LoadSettings, LocalPreferences, Logout,
    NavigationGate, ProfileSync, RegisterAccount, SaveSettings, SignIn,
};
use nt_app::AppDeps;

/// Application runtime: ports plus the services built on them once.
pub struct AppRuntime {
    deps: AppDeps,
    preferences: Arc<LocalPreferences>,
    watcher: Arc<AuthStateWatcher>,
    profiles: Arc<ProfileSync>,
    gate: Arc<NavigationGate>,
}

impl AppRuntime {
    pub fn new(deps: AppDeps) -> Self {
        let preferences = Arc::new(LocalPreferences::new(deps.key_value.clone()));
        let watcher = Arc::new(AuthStateWatcher::new(deps.auth.clone()));
        let profiles = Arc::new(ProfileSync::new(
            deps.documents.clone(),
            deps.auth.clone(),
            deps.clock.clone(),
        ));
        let gate = Arc::new(NavigationGate::new(
            preferences.clone(),
            profiles.clone(),
            watcher.clone(),
        ));

        Self {
            deps,
            preferences,
            watcher,
            profiles,
            gate,
        }
    }

    /// Start reconciling session facts. Keep the returned handle alive for
    /// as long as routing decisions are needed.
    pub async fn start(&self) -> GateSession {
        self.gate.start().await
    }

    pub fn gate(&self) -> &Arc<NavigationGate> {
        &self.gate
    }

    pub fn watcher(&self) -> &Arc<AuthStateWatcher> {
        &self.watcher
    }

    pub fn deps(&self) -> &AppDeps {
        &self.deps
    }

    pub fn usecases(&self) -> UseCases<'_> {
        UseCases::new(self)
    }
}

/// Factory for per-call use case instances.
/// 用例实例工厂。
pub struct UseCases<'a> {
    runtime: &'a AppRuntime,
}

impl<'a> UseCases<'a> {
    pub fn new(runtime: &'a AppRuntime) -> Self {
        Self { runtime }
    }

    pub fn register_account(&self) -> RegisterAccount {
        RegisterAccount::new(
            self.runtime.deps.auth.clone(),
            self.runtime.profiles.clone(),
            self.runtime.gate.clone(),
        )
    }

    pub fn sign_in(&self) -> SignIn {
        SignIn::new(self.runtime.deps.auth.clone(), self.runtime.gate.clone())
    }

    pub fn continue_as_guest(&self) -> ContinueAsGuest {
        ContinueAsGuest::new(self.runtime.gate.clone())
    }

    pub fn logout(&self) -> Logout {
        Logout::new(self.runtime.deps.auth.clone(), self.runtime.gate.clone())
    }

    pub fn delete_account(&self) -> DeleteAccount {
        DeleteAccount::new(
            self.runtime.watcher.clone(),
            self.runtime.profiles.clone(),
            self.runtime.gate.clone(),
        )
    }

    pub fn complete_profile_setup(&self) -> CompleteProfileSetup {
        CompleteProfileSetup::new(
            self.runtime.watcher.clone(),
            self.runtime.profiles.clone(),
            self.runtime.gate.clone(),
        )
    }

    pub fn calculate_goals(&self) -> CalculateGoals {
        CalculateGoals::new()
    }

    pub fn load_settings(&self) -> LoadSettings {
        LoadSettings::new(self.runtime.watcher.clone(), self.runtime.profiles.clone())
    }

    pub fn save_settings(&self) -> SaveSettings {
        SaveSettings::new(
            self.runtime.watcher.clone(),
            self.runtime.profiles.clone(),
            self.runtime.deps.clock.clone(),
        )
    }

    pub fn load_greeting(&self) -> LoadGreeting {
        LoadGreeting::new(
            self.runtime.watcher.clone(),
            self.runtime.profiles.clone(),
            self.runtime.preferences.clone(),
        )
    }

    pub fn footer_routing(&self) -> FooterRouting {
        FooterRouting::new(self.runtime.watcher.clone())
    }
}
