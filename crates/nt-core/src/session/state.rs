use crate::auth::AuthState;
use crate::ids::Uid;

use super::route::{Route, RouteDecision};

/// What is known about the local registration hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalFlagStatus {
    /// Not read yet.
    Unread,
    Known(bool),
    /// Storage failed; the hint will never arrive.
    Unavailable,
}

/// Navigation phase.
///
/// 导航阶段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing is known yet. No screen may be rendered.
    ///
    /// 尚未确定，不渲染任何页面。
    Undetermined,
    /// The local hint says registered; identity has not reported.
    ///
    /// 本地标记为已注册，身份尚未上报。
    Provisional,
    /// Signed out. `continued` once the user chose to continue without an account.
    ///
    /// 访客。
    Guest { continued: bool },
    /// Signed in, profile lookup in flight.
    ///
    /// 已登录，正在查询资料。
    ResolvingProfile { uid: Uid },
    /// Signed in without a profile document. Routes to setup.
    ///
    /// 已登录但资料未完成。
    AuthenticatedIncomplete { uid: Uid },
    /// Signed in with a profile document.
    ///
    /// 已登录且资料完整。
    AuthenticatedReady { uid: Uid },
}

impl SessionPhase {
    pub fn uid(&self) -> Option<&Uid> {
        match self {
            SessionPhase::ResolvingProfile { uid }
            | SessionPhase::AuthenticatedIncomplete { uid }
            | SessionPhase::AuthenticatedReady { uid } => Some(uid),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.uid().is_some()
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::Undetermined => "undetermined",
            SessionPhase::Provisional => "provisional",
            SessionPhase::Guest { .. } => "guest",
            SessionPhase::ResolvingProfile { .. } => "resolving_profile",
            SessionPhase::AuthenticatedIncomplete { .. } => "authenticated_incomplete",
            SessionPhase::AuthenticatedReady { .. } => "authenticated_ready",
        }
    }
}

/// Facts gathered so far plus the phase derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub local_flag: LocalFlagStatus,
    pub identity: AuthState,
    pub phase: SessionPhase,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}

impl SessionState {
    pub fn initial() -> Self {
        Self {
            local_flag: LocalFlagStatus::Unread,
            identity: AuthState::Unknown,
            phase: SessionPhase::Undetermined,
        }
    }

    /// Uid that subsequent data calls run under.
    pub fn active_uid(&self) -> Option<&Uid> {
        self.identity.uid()
    }

    /// Derive the route for the current phase. `None` means render nothing.
    pub fn route_decision(&self) -> Option<RouteDecision> {
        let decision = match &self.phase {
            SessionPhase::Undetermined => return None,
            SessionPhase::Provisional | SessionPhase::ResolvingProfile { .. } => RouteDecision {
                initial_route: Route::Home,
                redirect_route: None,
                provisional: true,
            },
            SessionPhase::Guest { continued } => RouteDecision {
                initial_route: Route::RegisterLogin,
                redirect_route: continued.then_some(Route::Home),
                provisional: !self.identity.is_known(),
            },
            SessionPhase::AuthenticatedIncomplete { .. } => RouteDecision {
                initial_route: Route::Home,
                redirect_route: Some(Route::UserSetup),
                provisional: false,
            },
            SessionPhase::AuthenticatedReady { .. } => RouteDecision::settled(Route::Home),
        };
        Some(decision)
    }
}
