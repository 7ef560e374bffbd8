//! # nt-core
//!
//! Core domain models and business logic for NutriTrack.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the goal calculator, the session reconciliation state machine, and the port
//! traits that adapters in `nt-infra` implement.

// Public module exports
pub mod auth;
pub mod config;
pub mod goals;
pub mod ids;
pub mod ports;
pub mod preferences;
pub mod profile;
pub mod session;

// Re-export commonly used types at the crate root
pub use auth::{AuthState, Credentials, Identity};
pub use config::AppConfig;
pub use goals::{compute_goals, DailyGoals, GoalForm, GoalValidationError};
pub use ids::Uid;
pub use preferences::LocalFlag;
pub use profile::{ActivityLevel, ProfilePatch, Sex, UserProfile, UserSettings};
pub use session::{Route, RouteDecision, SessionPhase, SessionState};
