//! Business logic use cases
//! 业务用例
//!
//! Shared services (preferences, auth watcher, profile sync, navigation
//! gate) are long-lived and held behind `Arc`. Intent use cases are cheap
//! and built per call from those services.

pub mod account;
pub mod auth_watcher;
pub mod footer;
pub mod home;
pub mod navigation;
pub mod preferences;
pub mod profile_setup;
pub mod profile_sync;
pub mod settings;

pub use account::{ContinueAsGuest, DeleteAccount, Logout, RegisterAccount, SessionError, SignIn};
pub use auth_watcher::{AuthStateListener, AuthStateWatcher, AuthSubscription};
pub use footer::{FooterRouting, FooterTab};
pub use home::LoadGreeting;
pub use navigation::{GateSession, NavigationGate};
pub use preferences::LocalPreferences;
pub use profile_setup::{CompleteProfileSetup, ProfileSetupError};
pub use profile_sync::{AccountDeletionError, DeletionStep, ProfileSync, SyncError};
pub use settings::{CalculateGoals, LoadSettings, SaveSettings, SettingsError};
