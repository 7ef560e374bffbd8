//! Mock implementations of ports for testing.
//!
//! This module provides mock implementations using `mockall` for unit testing
//! port consumers without a real backend.

use async_trait::async_trait;
use mockall::mock;
use tokio::sync::watch;

use crate::auth::{AuthState, Credentials, Identity};
use crate::ports::{
    AuthError, AuthServicePort, Document, DocumentStoreError, DocumentStorePort, KeyValueStorePort,
};

mock! {
    pub KeyValue {}

    #[async_trait]
    impl KeyValueStorePort for KeyValue {
        async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;
        async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;
        async fn remove_item(&self, key: &str) -> anyhow::Result<()>;
    }
}

mock! {
    pub Store {}

    #[async_trait]
    impl DocumentStorePort for Store {
        async fn get(&self, collection: &str, id: &str)
            -> Result<Option<Document>, DocumentStoreError>;
        async fn set(
            &self,
            collection: &str,
            id: &str,
            data: Document,
            merge: bool,
        ) -> Result<(), DocumentStoreError>;
        async fn delete(&self, collection: &str, id: &str) -> Result<(), DocumentStoreError>;
    }
}

mock! {
    pub Auth {}

    #[async_trait]
    impl AuthServicePort for Auth {
        async fn register_with_credentials(&self, credentials: &Credentials)
            -> Result<Identity, AuthError>;
        async fn sign_in_with_credentials(&self, credentials: &Credentials)
            -> Result<Identity, AuthError>;
        async fn sign_out(&self) -> Result<(), AuthError>;
        async fn delete_current_user(&self) -> Result<(), AuthError>;
        fn subscribe_to_auth_state(&self) -> watch::Receiver<AuthState>;
    }
}

#[tokio::test]
async fn mock_store_reports_missing_document() {
    let mut store = MockStore::new();
    store.expect_get().returning(|_, _| Ok(None));

    let found = store.get("users", "u-1").await.unwrap();
    assert!(found.is_none());
}

#[test]
fn default_current_auth_state_reads_subscription() {
    let (_tx, rx) = watch::channel(AuthState::SignedOut);
    let mut auth = MockAuth::new();
    auth.expect_subscribe_to_auth_state()
        .returning(move || rx.clone());

    assert_eq!(auth.current_auth_state(), AuthState::SignedOut);
}
