//! Device-local key/value stores

mod file_kv;
mod memory_kv;

pub use file_kv::{FileKeyValueStore, DEFAULT_PREFERENCES_FILE};
pub use memory_kv::InMemoryKeyValueStore;
