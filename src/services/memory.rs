//! In-process service backends
//!
//! These back the sync core in tests and local development. They honor the
//! same contracts as the remote backends (server-assigned ids, monotonic
//! insert timestamps, last-write-wins uploads) and can be switched into a
//! failing mode to exercise error paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{HubError, Result};
use crate::models::UserProfile;
use crate::services::{AuthProvider, DeviceStore, Document, DocumentStore, ObjectHandle, ObjectStore};

struct StoredAccount {
    uid: String,
    password: String,
    display_name: Option<String>,
}

/// In-memory auth provider keyed by email
#[derive(Default)]
pub struct MemoryAuthProvider {
    accounts: Mutex<HashMap<String, StoredAccount>>,
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserProfile> {
        let mut accounts = self.accounts.lock().await;

        if accounts.contains_key(email) {
            return Err(HubError::Auth("EMAIL_EXISTS".to_string()));
        }
        if password.len() < 6 {
            return Err(HubError::Auth(
                "WEAK_PASSWORD : Password should be at least 6 characters".to_string(),
            ));
        }

        let uid = Uuid::new_v4().to_string();
        accounts.insert(
            email.to_string(),
            StoredAccount {
                uid: uid.clone(),
                password: password.to_string(),
                display_name: None,
            },
        );

        Ok(UserProfile {
            uid,
            email: email.to_string(),
            display_name: None,
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile> {
        let accounts = self.accounts.lock().await;

        match accounts.get(email) {
            Some(account) if account.password == password => Ok(UserProfile {
                uid: account.uid.clone(),
                email: email.to_string(),
                display_name: account.display_name.clone(),
            }),
            _ => Err(HubError::Auth("INVALID_LOGIN_CREDENTIALS".to_string())),
        }
    }

    async fn sign_out(&self) -> Result<()> {
        Ok(())
    }

    async fn update_profile(&self, uid: &str, display_name: &str) -> Result<UserProfile> {
        let mut accounts = self.accounts.lock().await;

        for (email, account) in accounts.iter_mut() {
            if account.uid == uid {
                account.display_name = Some(display_name.to_string());
                return Ok(UserProfile {
                    uid: uid.to_string(),
                    email: email.clone(),
                    display_name: account.display_name.clone(),
                });
            }
        }

        Err(HubError::Auth(format!("no account with uid {uid}")))
    }
}

/// In-memory document store
///
/// Insert assigns a v4 uuid and stamps `createdAt` server-side, never going
/// backwards even if the wall clock does. [`Self::seed`] bypasses stamping
/// so tests can build legacy records (e.g. missing timestamps).
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    last_stamp: Mutex<i64>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read fail with a fetch error
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every mutation fail with a write error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Insert a raw document as-is, without id or timestamp assignment
    pub async fn seed(&self, collection: &str, document: Document) {
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }

    /// Number of documents currently in a collection
    pub async fn document_count(&self, collection: &str) -> usize {
        let collections = self.collections.lock().await;
        collections.get(collection).map_or(0, Vec::len)
    }

    fn check_read(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(HubError::Fetch("document store unavailable".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(HubError::Write(
                "document store rejected the write".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, mut fields: Map<String, Value>) -> Result<String> {
        self.check_write()?;

        // Server-side timestamp, monotonically increasing per insertion even
        // within one wall-clock second.
        let mut last_stamp = self.last_stamp.lock().await;
        let stamp = Utc::now().timestamp().max(*last_stamp + 1);
        *last_stamp = stamp;
        fields.insert(
            "createdAt".to_string(),
            serde_json::json!({ "seconds": stamp }),
        );

        let id = Uuid::new_v4().to_string();
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields,
            });

        Ok(id)
    }

    async fn get_all(&self, collection: &str) -> Result<Vec<Document>> {
        self.check_read()?;

        let collections = self.collections.lock().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.check_read()?;

        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id))
            .cloned())
    }

    async fn query(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<Document>> {
        self.check_read()?;

        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| doc.fields.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update(&self, collection: &str, id: &str, fields: Map<String, Value>) -> Result<()> {
        self.check_write()?;

        let mut collections = self.collections.lock().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| HubError::NotFound(id.to_string()))?;

        for (name, value) in fields {
            doc.fields.insert(name, value);
        }

        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.check_write()?;

        let mut collections = self.collections.lock().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.retain(|doc| doc.id != id);
        }

        Ok(())
    }
}

struct StoredObject {
    content_type: String,
    bytes: Vec<u8>,
}

/// In-memory object store
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    fail_uploads: AtomicBool,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every upload fail
    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub async fn object_count(&self) -> usize {
        self.objects.lock().await.len()
    }

    pub async fn contains(&self, path: &str) -> bool {
        self.objects.lock().await.contains_key(path)
    }

    pub async fn content_type_of(&self, path: &str) -> Option<String> {
        self.objects
            .lock()
            .await
            .get(path)
            .map(|object| object.content_type.clone())
    }

    pub async fn bytes_of(&self, path: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .await
            .get(path)
            .map(|object| object.bytes.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<ObjectHandle> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(HubError::Upload(
                "object store rejected the upload".to_string(),
            ));
        }

        let mut objects = self.objects.lock().await;
        objects.insert(
            path.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                bytes,
            },
        );

        Ok(ObjectHandle {
            path: path.to_string(),
        })
    }

    async fn resolve_url(&self, handle: &ObjectHandle) -> Result<String> {
        Ok(format!("memory://write-hub-media/{}", handle.path))
    }
}

/// In-memory device storage
#[derive(Default)]
pub struct MemoryDeviceStore {
    entries: std::sync::Mutex<HashMap<String, String>>,
}

impl MemoryDeviceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeviceStore for MemoryDeviceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("device store lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("device store lock poisoned")
            .insert(key.to_string(), value.to_string());
    }
}
