//! Remote document store port
//!
//! Documents are addressed by `(collection, id)`. Writes either merge into
//! the existing document or replace it wholesale.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use super::errors::DocumentStoreError;

/// A single stored document: top-level field name to value.
pub type Document = Map<String, Value>;

#[async_trait]
pub trait DocumentStorePort: Send + Sync {
    /// Fetch a document. `Ok(None)` when it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, DocumentStoreError>;

    /// Write a document.
    ///
    /// With `merge` only the supplied top-level fields change; otherwise the
    /// stored document becomes exactly `data`.
    async fn set(
        &self,
        collection: &str,
        id: &str,
        data: Document,
        merge: bool,
    ) -> Result<(), DocumentStoreError>;

    /// Delete a document. Deleting a missing document succeeds.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), DocumentStoreError>;
}

/// Serialize a model into a document. Only JSON objects are accepted.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, DocumentStoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DocumentStoreError::Malformed(format!(
            "expected an object, got {other}"
        ))),
        Err(err) => Err(DocumentStoreError::Malformed(err.to_string())),
    }
}

pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, DocumentStoreError> {
    serde_json::from_value(Value::Object(document))
        .map_err(|err| DocumentStoreError::Malformed(err.to_string()))
}
