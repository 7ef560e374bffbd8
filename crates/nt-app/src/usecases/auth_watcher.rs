//! Identity stream subscription
//! 身份状态订阅
//!
//! Wraps [`AuthServicePort::subscribe_to_auth_state`] with listener
//! delivery, de-duplication of token refreshes and RAII release.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use nt_core::ports::{AuthError, AuthServicePort};
use nt_core::{AuthState, Uid};

/// Receives identity changes.
#[async_trait]
pub trait AuthStateListener: Send + Sync {
    async fn on_auth_state(&self, state: AuthState);
}

/// Live subscription. Dropping it stops delivery.
pub struct AuthSubscription {
    task: JoinHandle<()>,
    live: Arc<AtomicUsize>,
}

impl AuthSubscription {
    pub fn unsubscribe(self) {}
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        self.task.abort();
        self.live.fetch_sub(1, Ordering::SeqCst);
        debug!("auth subscription released");
    }
}

/// Observes the identity stream of an [`AuthServicePort`].
///
/// ## Behavior / 行为
/// - A new listener gets the current state right away, then every change
/// - A refresh that reports the same uid again is not re-delivered
/// - `subscribe` spawns onto the ambient tokio runtime
pub struct AuthStateWatcher {
    auth: Arc<dyn AuthServicePort>,
    live: Arc<AtomicUsize>,
}

impl AuthStateWatcher {
    pub fn new(auth: Arc<dyn AuthServicePort>) -> Self {
        Self {
            auth,
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn subscribe(&self, listener: Arc<dyn AuthStateListener>) -> AuthSubscription {
        let mut rx = self.auth.subscribe_to_auth_state();
        self.live.fetch_add(1, Ordering::SeqCst);

        let task = tokio::spawn(async move {
            let mut last = rx.borrow_and_update().clone();
            listener.on_auth_state(last.clone()).await;

            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                if same_session(&last, &next) {
                    trace!("auth state refresh without session change");
                    continue;
                }
                last = next.clone();
                listener.on_auth_state(next).await;
            }
            debug!("auth state stream closed");
        });

        AuthSubscription {
            task,
            live: self.live.clone(),
        }
    }

    pub fn current(&self) -> AuthState {
        self.auth.current_auth_state()
    }

    pub fn current_uid(&self) -> Option<Uid> {
        self.current().uid().cloned()
    }

    /// Uid for a data call, or [`AuthError::NotSignedIn`].
    pub fn require_uid(&self) -> Result<Uid, AuthError> {
        self.current_uid().ok_or(AuthError::NotSignedIn)
    }

    pub fn is_signed_in(&self) -> bool {
        self.current().is_signed_in()
    }

    /// Number of subscriptions not yet released.
    pub fn active_subscriptions(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

fn same_session(a: &AuthState, b: &AuthState) -> bool {
    match (a, b) {
        (AuthState::SignedIn(a), AuthState::SignedIn(b)) => a.uid == b.uid,
        (AuthState::SignedOut, AuthState::SignedOut) => true,
        (AuthState::Unknown, AuthState::Unknown) => true,
        _ => false,
    }
}
