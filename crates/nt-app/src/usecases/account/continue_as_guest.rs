use std::sync::Arc;

use tracing::{info_span, Instrument};

use nt_core::session::SessionEvent;
use nt_core::RouteDecision;

use crate::usecases::navigation::NavigationGate;

/// Continue without an account.
pub struct ContinueAsGuest {
    gate: Arc<NavigationGate>,
}

impl ContinueAsGuest {
    pub fn new(gate: Arc<NavigationGate>) -> Self {
        Self { gate }
    }

    pub async fn execute(&self) -> Option<RouteDecision> {
        let span = info_span!("usecase.continue_as_guest.execute");
        async {
            let state = self.gate.dispatch(SessionEvent::ContinuedAsGuest).await;
            // Guest mode never authenticates; still authenticated means ignored.
            if state.phase.is_authenticated() {
                return None;
            }
            state.route_decision()
        }
        .instrument(span)
        .await
    }
}
