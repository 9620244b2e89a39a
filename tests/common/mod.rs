//! Shared fixtures for the integration tests
#![allow(dead_code)]

use std::sync::Arc;

use serde_json::Value;
use write_hub::likes::LikeRecord;
use write_hub::services::{
    AuthProvider, DeviceStore, Document, DocumentStore, MemoryAuthProvider, MemoryDeviceStore,
    MemoryDocumentStore,
};
use write_hub::{SessionContext, POST_COLLECTION};

pub const LIKE_KEY: &str = "userLikes";

/// Build a raw post document; `seconds: None` leaves `createdAt` absent
/// (legacy record shape).
pub fn post_doc(id: &str, title: &str, likes: i64, seconds: Option<i64>) -> Document {
    let mut fields = serde_json::json!({
        "title": title,
        "content": format!("content of {title}"),
        "author": "Fixture Author",
        "authorId": "fixture-uid",
        "authorEmail": "fixture@example.com",
        "likes": likes,
    });

    if let Some(seconds) = seconds {
        fields["createdAt"] = serde_json::json!({ "seconds": seconds });
    }

    Document {
        id: id.to_string(),
        fields: fields.as_object().cloned().unwrap_or_default(),
    }
}

pub async fn seed_post(store: &MemoryDocumentStore, id: &str, likes: i64, seconds: Option<i64>) {
    store
        .seed(POST_COLLECTION, post_doc(id, id, likes, seconds))
        .await;
}

pub async fn likes_of(store: &MemoryDocumentStore, id: &str) -> i64 {
    store
        .get_by_id(POST_COLLECTION, id)
        .await
        .expect("store read")
        .and_then(|doc| doc.fields.get("likes").and_then(Value::as_i64))
        .unwrap_or(0)
}

pub fn fresh_like_record(device: &Arc<MemoryDeviceStore>) -> LikeRecord {
    let device: Arc<dyn DeviceStore> = device.clone();
    LikeRecord::load(device, LIKE_KEY)
}

/// A session already signed in as `email` with display name `name`
pub async fn signed_in(
    auth: &Arc<MemoryAuthProvider>,
    email: &str,
    name: Option<&str>,
) -> SessionContext {
    let auth: Arc<dyn AuthProvider> = auth.clone();
    let mut session = SessionContext::new(auth);
    session
        .signup(email, "hunter22", name)
        .await
        .expect("signup");
    session
}
