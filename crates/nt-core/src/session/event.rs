use crate::auth::{AuthState, Identity};
use crate::ids::Uid;

/// Result of a profile lookup started by [`SessionAction::LookupProfile`](super::SessionAction::LookupProfile).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLookupOutcome {
    Found { username: Option<String> },
    Missing,
    /// The store could not be reached; the cached profile is trusted.
    Failed,
}

/// Events that drive the session state machine.
///
/// 驱动会话状态机的事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Local hint read at launch. `None` when storage was unavailable.
    LocalFlagLoaded { is_registered: Option<bool> },
    /// Identity stream delivered a value.
    IdentityChanged(AuthState),
    ProfileLookupFinished {
        uid: Uid,
        outcome: ProfileLookupOutcome,
    },

    // User intents, dispatched after the remote call succeeded.
    Registered(Identity),
    SignedIn(Identity),
    ContinuedAsGuest,
    ProfileSetupCompleted { uid: Uid, username: String },
    LoggedOut,
    AccountDeleted,
}
