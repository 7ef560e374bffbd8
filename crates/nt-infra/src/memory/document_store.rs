use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use nt_core::ports::{Document, DocumentStoreError, DocumentStorePort};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    Get,
    Set,
    Delete,
}

/// Document store kept in memory. Merges are shallow, like the hosted store's
/// top-level merge.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<(String, String), Document>>,
    failures: RwLock<HashSet<(StoreOperation, String)>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `operation` on `collection` fail as unavailable.
    pub async fn fail_on(&self, operation: StoreOperation, collection: &str) {
        self.failures
            .write()
            .await
            .insert((operation, collection.to_string()));
    }

    pub async fn clear_failures(&self) {
        self.failures.write().await.clear();
    }

    pub async fn contains(&self, collection: &str, id: &str) -> bool {
        self.documents
            .read()
            .await
            .contains_key(&(collection.to_string(), id.to_string()))
    }

    async fn check(&self, operation: StoreOperation, collection: &str) -> Result<(), DocumentStoreError> {
        if self
            .failures
            .read()
            .await
            .contains(&(operation, collection.to_string()))
        {
            return Err(DocumentStoreError::Unavailable(format!(
                "{operation:?} on {collection} is failing"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStorePort for InMemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, DocumentStoreError> {
        self.check(StoreOperation::Get, collection).await?;
        Ok(self
            .documents
            .read()
            .await
            .get(&(collection.to_string(), id.to_string()))
            .cloned())
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        data: Document,
        merge: bool,
    ) -> Result<(), DocumentStoreError> {
        self.check(StoreOperation::Set, collection).await?;
        let mut documents = self.documents.write().await;
        let key = (collection.to_string(), id.to_string());
        match documents.get_mut(&key) {
            Some(existing) if merge => existing.extend(data),
            _ => {
                documents.insert(key, data);
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), DocumentStoreError> {
        self.check(StoreOperation::Delete, collection).await?;
        self.documents
            .write()
            .await
            .remove(&(collection.to_string(), id.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn merge_keeps_untouched_fields() {
        let store = InMemoryDocumentStore::new();
        store
            .set("users", "u-1", doc(json!({"uid": "u-1", "email": "a@b.c"})), false)
            .await
            .unwrap();
        store
            .set("users", "u-1", doc(json!({"username": "sam"})), true)
            .await
            .unwrap();

        let stored = store.get("users", "u-1").await.unwrap().unwrap();
        assert_eq!(stored, doc(json!({"uid": "u-1", "email": "a@b.c", "username": "sam"})));
    }

    #[tokio::test]
    async fn replace_drops_previous_fields() {
        let store = InMemoryDocumentStore::new();
        store
            .set("user_settings", "u-1", doc(json!({"height": 180.0, "age": 30})), false)
            .await
            .unwrap();
        store
            .set("user_settings", "u-1", doc(json!({"age": 31})), false)
            .await
            .unwrap();

        let stored = store.get("user_settings", "u-1").await.unwrap().unwrap();
        assert_eq!(stored, doc(json!({"age": 31})));
    }

    #[tokio::test]
    async fn injected_failure_applies_to_one_collection() {
        let store = InMemoryDocumentStore::new();
        store.fail_on(StoreOperation::Delete, "user_settings").await;

        assert!(store.delete("users", "u-1").await.is_ok());
        assert!(matches!(
            store.delete("user_settings", "u-1").await,
            Err(DocumentStoreError::Unavailable(_))
        ));
    }
}
