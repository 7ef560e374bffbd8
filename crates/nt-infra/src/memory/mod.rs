//! In-process identity service and document store
//!
//! Used by tests and by the `memory` backend, which runs the whole app
//! offline without any hosted service.

mod auth;
mod document_store;

pub use auth::InMemoryAuthService;
pub use document_store::{InMemoryDocumentStore, StoreOperation};
