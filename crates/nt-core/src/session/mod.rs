//! Session reconciliation domain module.
//!
//! This module defines the navigation-gating state machine that merges the
//! local registration hint, the identity stream and the profile lookup into
//! a single [`RouteDecision`].

pub mod action;
pub mod event;
pub mod route;
pub mod state;
pub mod state_machine;

pub use action::SessionAction;
pub use event::{ProfileLookupOutcome, SessionEvent};
pub use route::{Route, RouteDecision};
pub use state::{LocalFlagStatus, SessionPhase, SessionState};
pub use state_machine::SessionStateMachine;
