use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use nt_core::ports::AuthServicePort;
use nt_core::session::SessionEvent;

use super::SessionError;
use crate::usecases::navigation::NavigationGate;

/// Sign out and forget the device-local session.
///
/// ## Behavior / 行为
/// - Clears `isRegistered` and the cached username and routes to login first
/// - Then signs out with the identity service
/// - A failed sign-out is reported, the local session stays cleared
pub struct Logout {
    auth: Arc<dyn AuthServicePort>,
    gate: Arc<NavigationGate>,
}

impl Logout {
    pub fn new(auth: Arc<dyn AuthServicePort>, gate: Arc<NavigationGate>) -> Self {
        Self { auth, gate }
    }

    pub async fn execute(&self) -> Result<(), SessionError> {
        let span = info_span!("usecase.logout.execute");
        async {
            self.gate.dispatch(SessionEvent::LoggedOut).await;
            if let Err(err) = self.auth.sign_out().await {
                warn!(error = %err, "sign-out failed after local session was cleared");
                return Err(err.into());
            }
            info!("logged out");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
