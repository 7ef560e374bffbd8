//! Device-local key/value storage port
//!
//! Mirrors the string-to-string storage available on the device. Values
//! survive restarts; they are not synchronised anywhere.

use async_trait::async_trait;

#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// Read a value. `Ok(None)` when the key was never written.
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;

    async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> anyhow::Result<()>;
}
