use crate::ids::Uid;

/// Side-effects produced by session transitions.
///
/// 会话状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Write `isRegistered`.
    PersistRegisteredFlag(bool),
    /// Remove `isRegistered` and the cached username.
    ClearLocalSession,
    /// Check whether a profile document exists for the signed-in uid.
    LookupProfile { uid: Uid },
    /// Refresh the cached username.
    CacheUsername(String),
}
