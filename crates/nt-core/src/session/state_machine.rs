//! Session state machine.
//!
//! Defines a pure state transition function for navigation gating.
//!
//! Priority rule: identity is authoritative over the local hint whenever
//! both are known. The hint only picks a provisional route while the
//! identity stream is still silent.

use crate::auth::AuthState;

use super::action::SessionAction;
use super::event::{ProfileLookupOutcome, SessionEvent};
use super::state::{LocalFlagStatus, SessionPhase, SessionState};

/// Pure session state machine.
///
/// 纯状态机：不包含副作用。
pub struct SessionStateMachine;

impl SessionStateMachine {
    pub fn transition(
        state: SessionState,
        event: SessionEvent,
    ) -> (SessionState, Vec<SessionAction>) {
        let mut next = state;
        let mut actions = Vec::new();

        match event {
            SessionEvent::LocalFlagLoaded { is_registered } => {
                next.local_flag = match is_registered {
                    Some(value) => LocalFlagStatus::Known(value),
                    None => LocalFlagStatus::Unavailable,
                };
                reconcile(&mut next, &mut actions);
            }
            SessionEvent::IdentityChanged(identity) => {
                // A known identity never regresses to "not reported yet".
                if !identity.is_known() && next.identity.is_known() {
                    return (next, actions);
                }
                next.identity = identity;
                reconcile(&mut next, &mut actions);
            }
            SessionEvent::ProfileLookupFinished { uid, outcome } => {
                let pending = matches!(
                    &next.phase,
                    SessionPhase::ResolvingProfile { uid: current } if *current == uid
                );
                // Results for a uid that is no longer current are dropped.
                if pending {
                    next.phase = match outcome {
                        ProfileLookupOutcome::Found { username } => {
                            if let Some(username) = username {
                                actions.push(SessionAction::CacheUsername(username));
                            }
                            SessionPhase::AuthenticatedReady { uid }
                        }
                        ProfileLookupOutcome::Missing => SessionPhase::AuthenticatedIncomplete { uid },
                        ProfileLookupOutcome::Failed => SessionPhase::AuthenticatedReady { uid },
                    };
                }
            }
            SessionEvent::Registered(identity) => {
                next.phase = SessionPhase::AuthenticatedIncomplete {
                    uid: identity.uid.clone(),
                };
                next.identity = AuthState::SignedIn(identity);
                next.local_flag = LocalFlagStatus::Known(true);
                actions.push(SessionAction::PersistRegisteredFlag(true));
            }
            SessionEvent::SignedIn(identity) => {
                next.identity = AuthState::SignedIn(identity);
                if next.local_flag != LocalFlagStatus::Known(true) {
                    next.local_flag = LocalFlagStatus::Known(true);
                    actions.push(SessionAction::PersistRegisteredFlag(true));
                }
                reconcile(&mut next, &mut actions);
            }
            SessionEvent::ContinuedAsGuest => {
                if next.phase.is_authenticated() {
                    return (next, actions);
                }
                next.phase = SessionPhase::Guest { continued: true };
                next.local_flag = LocalFlagStatus::Known(false);
                actions.push(SessionAction::PersistRegisteredFlag(false));
            }
            SessionEvent::ProfileSetupCompleted { uid, username } => {
                if next.phase.uid() == Some(&uid) {
                    next.phase = SessionPhase::AuthenticatedReady { uid };
                    actions.push(SessionAction::CacheUsername(username));
                }
            }
            SessionEvent::LoggedOut | SessionEvent::AccountDeleted => {
                next.identity = AuthState::SignedOut;
                next.local_flag = LocalFlagStatus::Known(false);
                next.phase = SessionPhase::Guest { continued: false };
                actions.push(SessionAction::ClearLocalSession);
            }
        }

        (next, actions)
    }
}

/// Re-derive the phase from the flag and identity facts.
fn reconcile(state: &mut SessionState, actions: &mut Vec<SessionAction>) {
    let guest_continued = matches!(state.phase, SessionPhase::Guest { continued: true });

    match &state.identity {
        AuthState::SignedIn(identity) => {
            if state.phase.uid() != Some(&identity.uid) {
                state.phase = SessionPhase::ResolvingProfile {
                    uid: identity.uid.clone(),
                };
                actions.push(SessionAction::LookupProfile {
                    uid: identity.uid.clone(),
                });
            }
            if state.local_flag == LocalFlagStatus::Known(false) {
                state.local_flag = LocalFlagStatus::Known(true);
                actions.push(SessionAction::PersistRegisteredFlag(true));
            }
        }
        AuthState::SignedOut => {
            state.phase = SessionPhase::Guest {
                continued: guest_continued,
            };
            if state.local_flag == LocalFlagStatus::Known(true) {
                state.local_flag = LocalFlagStatus::Known(false);
                actions.push(SessionAction::PersistRegisteredFlag(false));
            }
        }
        AuthState::Unknown => {
            state.phase = match state.local_flag {
                LocalFlagStatus::Unread => SessionPhase::Undetermined,
                LocalFlagStatus::Known(true) => SessionPhase::Provisional,
                LocalFlagStatus::Known(false) | LocalFlagStatus::Unavailable => {
                    SessionPhase::Guest {
                        continued: guest_continued,
                    }
                }
            };
        }
    }
}
