//! HTTP backends for the auth provider and the document store
//!
//! The auth endpoints are identity-toolkit shaped (`accounts:signUp`,
//! `accounts:signInWithPassword`, `accounts:update`, API key as a query
//! parameter); documents are plain collection/id REST with JSON bodies.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::config::{AuthConfig, DocumentStoreConfig};
use crate::error::{HubError, Result};
use crate::models::UserProfile;
use crate::services::{AuthProvider, Document, DocumentStore};

/// Auth provider over the remote identity endpoints
pub struct RestAuthProvider {
    client: reqwest::Client,
    config: AuthConfig,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
    display_name: Option<String>,
}

impl From<AccountResponse> for UserProfile {
    fn from(account: AccountResponse) -> Self {
        UserProfile {
            uid: account.local_id,
            email: account.email,
            display_name: account.display_name.filter(|name| !name.is_empty()),
        }
    }
}

impl RestAuthProvider {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn call(&self, endpoint: &str, body: Value) -> Result<UserProfile> {
        let url = format!(
            "{}/accounts:{}?key={}",
            self.config.base_url,
            endpoint,
            urlencoding::encode(&self.config.api_key)
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| HubError::Auth(format!("auth request failed: {e}")))?;

        if !response.status().is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(HubError::Auth(message));
        }

        let account = response
            .json::<AccountResponse>()
            .await
            .map_err(|e| HubError::Auth(format!("failed to parse auth response: {e}")))?;

        Ok(account.into())
    }
}

#[async_trait]
impl AuthProvider for RestAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserProfile> {
        info!("Creating account for {email}");
        self.call(
            "signUp",
            serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }),
        )
        .await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile> {
        info!("Signing in {email}");
        self.call(
            "signInWithPassword",
            serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }),
        )
        .await
    }

    async fn sign_out(&self) -> Result<()> {
        // Sessions are token-bound; signing out is a client-side token discard.
        debug!("Discarding session token");
        Ok(())
    }

    async fn update_profile(&self, uid: &str, display_name: &str) -> Result<UserProfile> {
        self.call(
            "update",
            serde_json::json!({
                "localId": uid,
                "displayName": display_name,
            }),
        )
        .await
    }
}

/// Document store over collection/id REST endpoints
pub struct RestDocumentStore {
    client: reqwest::Client,
    config: DocumentStoreConfig,
}

#[derive(Deserialize)]
struct InsertResponse {
    id: String,
}

impl RestDocumentStore {
    pub fn new(config: DocumentStoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url,
            urlencoding::encode(collection)
        )
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url,
            urlencoding::encode(collection),
            urlencoding::encode(id)
        )
    }
}

async fn read_failure(response: reqwest::Response) -> HubError {
    let status = response.status();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    HubError::Fetch(format!("{status}: {message}"))
}

async fn write_failure(response: reqwest::Response) -> HubError {
    let status = response.status();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    HubError::Write(format!("{status}: {message}"))
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn insert(&self, collection: &str, fields: Map<String, Value>) -> Result<String> {
        let response = self
            .client
            .post(self.collection_url(collection))
            .json(&fields)
            .send()
            .await
            .map_err(|e| HubError::Write(format!("insert request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(write_failure(response).await);
        }

        let inserted = response
            .json::<InsertResponse>()
            .await
            .map_err(|e| HubError::Write(format!("failed to parse insert response: {e}")))?;

        Ok(inserted.id)
    }

    async fn get_all(&self, collection: &str) -> Result<Vec<Document>> {
        let response = self
            .client
            .get(self.collection_url(collection))
            .send()
            .await
            .map_err(|e| HubError::Fetch(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(read_failure(response).await);
        }

        response
            .json::<Vec<Document>>()
            .await
            .map_err(|e| HubError::Fetch(format!("failed to parse documents: {e}")))
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let response = self
            .client
            .get(self.document_url(collection, id))
            .send()
            .await
            .map_err(|e| HubError::Fetch(format!("request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(read_failure(response).await);
        }

        response
            .json::<Document>()
            .await
            .map(Some)
            .map_err(|e| HubError::Fetch(format!("failed to parse document: {e}")))
    }

    async fn query(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<Document>> {
        // Equality filter only; the value travels as its JSON string form.
        let rendered = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };

        let response = self
            .client
            .get(self.collection_url(collection))
            .query(&[("field", field), ("value", rendered.as_str())])
            .send()
            .await
            .map_err(|e| HubError::Fetch(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(read_failure(response).await);
        }

        response
            .json::<Vec<Document>>()
            .await
            .map_err(|e| HubError::Fetch(format!("failed to parse documents: {e}")))
    }

    async fn update(&self, collection: &str, id: &str, fields: Map<String, Value>) -> Result<()> {
        let response = self
            .client
            .patch(self.document_url(collection, id))
            .json(&fields)
            .send()
            .await
            .map_err(|e| HubError::Write(format!("update request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(HubError::NotFound(id.to_string()));
        }
        if !response.status().is_success() {
            return Err(write_failure(response).await);
        }

        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.document_url(collection, id))
            .send()
            .await
            .map_err(|e| HubError::Write(format!("delete request failed: {e}")))?;

        if !response.status().is_success() && response.status() != reqwest::StatusCode::NOT_FOUND {
            return Err(write_failure(response).await);
        }

        Ok(())
    }
}
