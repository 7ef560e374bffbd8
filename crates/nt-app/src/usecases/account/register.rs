use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use nt_core::ports::AuthServicePort;
use nt_core::session::SessionEvent;
use nt_core::{Credentials, Identity};

use super::SessionError;
use crate::usecases::navigation::NavigationGate;
use crate::usecases::profile_sync::ProfileSync;

/// Create an account and its partial profile document.
///
/// ## Behavior / 行为
/// - Registers the credentials with the identity service
/// - Writes `{uid, email, createdAt}` to `users/{uid}`
/// - Marks the device registered and routes to profile setup
///
/// If the profile write fails the identity still exists. The gate then
/// resolves it from the identity stream and finds no profile, which also
/// ends on the setup screen.
pub struct RegisterAccount {
    auth: Arc<dyn AuthServicePort>,
    profiles: Arc<ProfileSync>,
    gate: Arc<NavigationGate>,
}

impl RegisterAccount {
    pub fn new(
        auth: Arc<dyn AuthServicePort>,
        profiles: Arc<ProfileSync>,
        gate: Arc<NavigationGate>,
    ) -> Self {
        Self {
            auth,
            profiles,
            gate,
        }
    }

    pub async fn execute(&self, credentials: &Credentials) -> Result<Identity, SessionError> {
        let span = info_span!("usecase.register_account.execute", email = %credentials.email);
        async {
            let identity = self.auth.register_with_credentials(credentials).await?;
            info!(uid = %identity.uid, "account registered");

            if let Err(err) = self
                .profiles
                .create_profile(&identity.uid, identity.email.clone())
                .await
            {
                warn!(error = %err, "failed to create initial profile");
                return Err(err.into());
            }

            self.gate
                .dispatch(SessionEvent::Registered(identity.clone()))
                .await;
            Ok(identity)
        }
        .instrument(span)
        .await
    }
}
