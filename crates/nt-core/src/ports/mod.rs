//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `nt-app` and the
//! adapters in `nt-infra`. The core only ever sees these traits, so the
//! backing service (hosted identity/document store, or the in-memory
//! doubles) can be swapped without touching session logic.
//!
//! ## Port Placement Guidelines
//!
//! A trait belongs here when it represents an external capability that
//! more than one use case depends on and that is implemented outside the
//! core. Everything else stays next to the domain module that needs it.

pub mod auth;
mod clock;
pub mod document_store;
pub mod errors;
pub mod key_value;

#[cfg(test)]
pub(crate) mod tests;

pub use auth::AuthServicePort;
pub use clock::*;
pub use document_store::{from_document, to_document, Document, DocumentStorePort};
pub use errors::{AuthError, DocumentStoreError};
pub use key_value::KeyValueStorePort;
