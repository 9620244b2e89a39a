//! Remote service boundaries
//!
//! The sync core never talks to a backend directly; everything goes through
//! these traits. Production backends live in [`rest`] (auth + documents) and
//! [`s3`] (object storage); [`memory`] provides in-process backends for tests
//! and local development, and [`disk`] backs local device storage with a
//! JSON file.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::models::UserProfile;

pub mod disk;
pub mod memory;
pub mod rest;
pub mod s3;

pub use disk::FileDeviceStore;
pub use memory::{
    MemoryAuthProvider, MemoryDeviceStore, MemoryDocumentStore, MemoryObjectStore,
};
pub use rest::{RestAuthProvider, RestDocumentStore};
pub use s3::S3ObjectStore;

/// A raw record in the remote document store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Store-assigned id, unique and immutable
    pub id: String,
    /// Schemaless field map
    pub fields: Map<String, Value>,
}

/// Handle to an uploaded object, resolvable to a public URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectHandle {
    /// Storage path the object was uploaded under
    pub path: String,
}

/// Remote authentication provider
///
/// Issues and validates user sessions; the sync core only ever sees the
/// resulting identity, never credentials or tokens.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Create a new account
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserProfile>;

    /// Sign in with existing credentials
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile>;

    /// End the current session
    async fn sign_out(&self) -> Result<()>;

    /// Set the display name on an account
    async fn update_profile(&self, uid: &str, display_name: &str) -> Result<UserProfile>;
}

/// Remote document store
///
/// Timestamps are assigned server-side on insert, monotonically
/// non-decreasing per insertion; the store offers no atomic increment, so
/// counter updates are client read-modify-write by contract.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document; returns the assigned id
    async fn insert(&self, collection: &str, fields: Map<String, Value>) -> Result<String>;

    /// Fetch every document in a collection, in store iteration order
    async fn get_all(&self, collection: &str) -> Result<Vec<Document>>;

    /// Fetch one document; `Ok(None)` when the id does not exist
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Fetch documents whose `field` equals `value`
    async fn query(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<Document>>;

    /// Merge `fields` into an existing document
    async fn update(&self, collection: &str, id: &str, fields: Map<String, Value>) -> Result<()>;

    /// Delete a document
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;
}

/// Remote object storage
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload bytes under `path`; reusing a path overwrites (last-write-wins)
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<ObjectHandle>;

    /// Resolve a handle to a retrievable URL
    async fn resolve_url(&self, handle: &ObjectHandle) -> Result<String>;
}

/// Local device storage (browser-localStorage shaped)
///
/// Single fixed-key usage, last-write-wins; writes are best-effort and
/// never fail the calling operation.
pub trait DeviceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}
