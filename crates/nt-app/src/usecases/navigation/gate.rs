//! Navigation gate orchestrator.
//!
//! Drives [`SessionStateMachine`] and executes its side effects.

use std::sync::{Arc, Weak};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, info, info_span, warn, Instrument};

use nt_core::session::{ProfileLookupOutcome, SessionAction, SessionEvent, SessionStateMachine};
use nt_core::{AuthState, RouteDecision, SessionState};

use super::context::GateContext;
use crate::usecases::auth_watcher::{AuthStateListener, AuthStateWatcher, AuthSubscription};
use crate::usecases::preferences::LocalPreferences;
use crate::usecases::profile_sync::ProfileSync;

/// Orchestrator that reconciles session facts into route decisions.
///
/// ## Behavior / 行为
/// - Nothing is decided before the local hint or the identity stream reports
/// - Identity wins over the hint as soon as both are known
/// - Stale hints are corrected in local storage
/// - Events are applied one at a time
pub struct NavigationGate {
    context: Arc<GateContext>,
    preferences: Arc<LocalPreferences>,
    profiles: Arc<ProfileSync>,
    watcher: Arc<AuthStateWatcher>,
}

/// Keeps the gate subscribed to the identity stream.
pub struct GateSession {
    _subscription: AuthSubscription,
}

impl GateSession {
    pub fn stop(self) {}
}

impl NavigationGate {
    pub fn new(
        preferences: Arc<LocalPreferences>,
        profiles: Arc<ProfileSync>,
        watcher: Arc<AuthStateWatcher>,
    ) -> Self {
        Self {
            context: Arc::new(GateContext::default()),
            preferences,
            profiles,
            watcher,
        }
    }

    /// Subscribe to identity changes and read the local hint.
    ///
    /// Both sources report independently; whichever arrives first drives
    /// the first decision.
    pub async fn start(self: &Arc<Self>) -> GateSession {
        let listener = Arc::new(GateListener {
            gate: Arc::downgrade(self),
        });
        let subscription = self.watcher.subscribe(listener);

        let flag = self.preferences.read_flag().await;
        self.dispatch(SessionEvent::LocalFlagLoaded {
            is_registered: flag.is_registered,
        })
        .await;

        GateSession {
            _subscription: subscription,
        }
    }

    /// Feed of decisions. `None` until something is known.
    pub fn decisions(&self) -> watch::Receiver<Option<RouteDecision>> {
        self.context.subscribe()
    }

    pub fn current_decision(&self) -> Option<RouteDecision> {
        self.context.current_decision()
    }

    pub async fn current(&self) -> SessionState {
        self.context.get_state().await
    }

    pub async fn dispatch(&self, event: SessionEvent) -> SessionState {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let span = info_span!("usecase.navigation_gate.dispatch", event = ?event);
        async {
            let mut current = self.context.get_state().await;
            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                let from = current.phase.name();
                let event_name = format!("{:?}", event);
                let (next, actions) = SessionStateMachine::transition(current, event);
                info!(
                    from,
                    to = next.phase.name(),
                    event = %event_name,
                    "session state transition"
                );
                let follow_up_events = self.execute_actions(actions).await;
                self.context.set_state(next.clone()).await;
                current = next;
                pending_events.extend(follow_up_events);
            }

            current
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(&self, actions: Vec<SessionAction>) -> Vec<SessionEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "session executing action");
            match action {
                SessionAction::PersistRegisteredFlag(registered) => {
                    self.preferences.mark_registered(registered).await;
                }
                SessionAction::ClearLocalSession => {
                    self.preferences.clear().await;
                }
                SessionAction::CacheUsername(username) => {
                    self.preferences.cache_username(&username).await;
                }
                SessionAction::LookupProfile { uid } => {
                    let outcome = match self.profiles.fetch_profile(&uid).await {
                        Ok(Some(profile)) => ProfileLookupOutcome::Found {
                            username: profile.username,
                        },
                        Ok(None) => ProfileLookupOutcome::Missing,
                        Err(err) => {
                            warn!(error = %err, %uid, "profile lookup failed");
                            ProfileLookupOutcome::Failed
                        }
                    };
                    follow_up_events.push(SessionEvent::ProfileLookupFinished { uid, outcome });
                }
            }
        }
        follow_up_events
    }
}

/// Forwards identity changes to the gate while it is alive.
struct GateListener {
    gate: Weak<NavigationGate>,
}

#[async_trait]
impl AuthStateListener for GateListener {
    async fn on_auth_state(&self, state: AuthState) {
        match self.gate.upgrade() {
            Some(gate) => {
                gate.dispatch(SessionEvent::IdentityChanged(state)).await;
            }
            None => debug!("navigation gate gone, dropping identity change"),
        }
    }
}
