//! Firestore documents API client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

use nt_core::config::FirebaseConfig;
use nt_core::ports::{AuthError, Document, DocumentStoreError, DocumentStorePort};

use super::auth::IdTokenSource;
use super::codec::{decode_fields, encode_fields};
use super::error::{map_store_status, transport_store_error};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct FirestoreDocumentStore {
    http: Client,
    config: FirebaseConfig,
    tokens: Arc<dyn IdTokenSource>,
}

impl FirestoreDocumentStore {
    pub fn new(config: FirebaseConfig, tokens: Arc<dyn IdTokenSource>) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
        Ok(Self::with_client(http, config, tokens))
    }

    pub fn with_client(http: Client, config: FirebaseConfig, tokens: Arc<dyn IdTokenSource>) -> Self {
        Self {
            http,
            config,
            tokens,
        }
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}/{}",
            self.config.firestore_endpoint.trim_end_matches('/'),
            self.config.project_id,
            collection,
            id
        )
    }

    /// Attach the API key and, when signed in, the bearer token.
    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, DocumentStoreError> {
        let request = request.query(&[("key", self.config.api_key.as_str())]);
        match self.tokens.id_token().await {
            Ok(Some(token)) => Ok(request.bearer_auth(token)),
            Ok(None) => Ok(request),
            Err(AuthError::Network(message)) => Err(DocumentStoreError::Unavailable(message)),
            Err(_) => Err(DocumentStoreError::Unauthenticated),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, String), DocumentStoreError> {
        let response = self
            .authorize(request)
            .await?
            .send()
            .await
            .map_err(transport_store_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_store_error)?;
        Ok((status, body))
    }
}

#[async_trait]
impl DocumentStorePort for FirestoreDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, DocumentStoreError> {
        let (status, body) = self
            .send(self.http.get(self.document_url(collection, id)))
            .await?;

        if status == StatusCode::NOT_FOUND {
            debug!(collection, id, "document not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(map_store_status(status, &body));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| DocumentStoreError::Malformed(e.to_string()))?;
        decode_fields(value.get("fields")).map(Some)
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        data: Document,
        merge: bool,
    ) -> Result<(), DocumentStoreError> {
        let mut request = self
            .http
            .patch(self.document_url(collection, id))
            .json(&json!({ "fields": encode_fields(&data) }));

        // Without a mask the PATCH replaces the whole document.
        if merge {
            let mask: Vec<(&str, &str)> = data
                .keys()
                .map(|field| ("updateMask.fieldPaths", field.as_str()))
                .collect();
            request = request.query(&mask);
        }

        let (status, body) = self.send(request).await?;
        if !status.is_success() {
            return Err(map_store_status(status, &body));
        }
        debug!(collection, id, merge, "document written");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), DocumentStoreError> {
        let (status, body) = self
            .send(self.http.delete(self.document_url(collection, id)))
            .await?;

        if status.is_success() || status == StatusCode::NOT_FOUND {
            debug!(collection, id, "document deleted");
            return Ok(());
        }
        Err(map_store_status(status, &body))
    }
}
