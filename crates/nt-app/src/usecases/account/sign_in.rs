use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use nt_core::ports::AuthServicePort;
use nt_core::session::SessionEvent;
use nt_core::{Credentials, Identity};

use super::SessionError;
use crate::usecases::navigation::NavigationGate;

/// Sign in with email and password.
///
/// ## Behavior / 行为
/// - Authenticates with the identity service
/// - Hands the identity to the gate, which looks up the profile
pub struct SignIn {
    auth: Arc<dyn AuthServicePort>,
    gate: Arc<NavigationGate>,
}

impl SignIn {
    pub fn new(auth: Arc<dyn AuthServicePort>, gate: Arc<NavigationGate>) -> Self {
        Self { auth, gate }
    }

    pub async fn execute(&self, credentials: &Credentials) -> Result<Identity, SessionError> {
        let span = info_span!("usecase.sign_in.execute", email = %credentials.email);
        async {
            let identity = self.auth.sign_in_with_credentials(credentials).await?;
            info!(uid = %identity.uid, "signed in");

            self.gate
                .dispatch(SessionEvent::SignedIn(identity.clone()))
                .await;
            Ok(identity)
        }
        .instrument(span)
        .await
    }
}
