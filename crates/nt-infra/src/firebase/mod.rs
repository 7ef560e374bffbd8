//! Hosted identity and document store over REST
//!
//! - `auth`: Identity Toolkit account endpoints plus secure-token refresh
//! - `firestore`: Firestore documents API
//! - `codec`: JSON <-> Firestore typed values

mod auth;
mod codec;
mod error;
mod firestore;
mod session;

pub use auth::{FirebaseAuthClient, IdTokenSource, AUTH_SESSION_KEY};
pub use codec::{decode_fields, encode_fields};
pub use firestore::FirestoreDocumentStore;
