//! Navigation gate
//! 导航门控
//!
//! Combines the local registration hint, the identity stream and the
//! profile document into a single observable [`RouteDecision`](nt_core::RouteDecision).

mod context;
mod gate;

pub use context::GateContext;
pub use gate::{GateSession, NavigationGate};
