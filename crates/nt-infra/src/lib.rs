pub mod firebase;
pub mod memory;
pub mod storage;
pub mod time;

pub use firebase::{FirebaseAuthClient, FirestoreDocumentStore};
pub use memory::{InMemoryAuthService, InMemoryDocumentStore};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
pub use time::SystemClock;
