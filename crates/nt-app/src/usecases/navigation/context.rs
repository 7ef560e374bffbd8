use tokio::sync::{watch, Mutex, MutexGuard};

use nt_core::{RouteDecision, SessionState};

/// Shared gate context containing state, dispatch lock and the decision feed.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: held for the whole transition + actions + publish cycle.
/// - `state`: short reads and the final write of each transition.
pub struct GateContext {
    state: Mutex<SessionState>,
    dispatch_lock: Mutex<()>,
    decisions: watch::Sender<Option<RouteDecision>>,
}

impl GateContext {
    pub fn new(initial_state: SessionState) -> Self {
        let (decisions, _) = watch::channel(initial_state.route_decision());
        Self {
            state: Mutex::new(initial_state),
            dispatch_lock: Mutex::new(()),
            decisions,
        }
    }

    pub async fn get_state(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn acquire_dispatch_lock(&self) -> MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Store `state` and publish its decision if it changed.
    ///
    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn set_state(&self, state: SessionState) {
        let decision = state.route_decision();
        *self.state.lock().await = state;
        self.decisions.send_if_modified(|current| {
            if *current == decision {
                false
            } else {
                *current = decision;
                true
            }
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<RouteDecision>> {
        self.decisions.subscribe()
    }

    pub fn current_decision(&self) -> Option<RouteDecision> {
        self.decisions.borrow().clone()
    }
}

impl Default for GateContext {
    fn default() -> Self {
        Self::new(SessionState::initial())
    }
}
