//! Integration tests for the owner dashboard synchronizer
//!
//! These verify:
//! 1. The owned set is filtered by the stored author email
//! 2. No session means a silent empty result, not an error
//! 3. Delete/edit only touch posts in the loaded owned set
//! 4. Remote failures leave local state unchanged

mod common;

use std::sync::Arc;

use common::post_doc;
use write_hub::services::{DocumentStore, MemoryDocumentStore};
use write_hub::{DashboardSynchronizer, HubError, POST_COLLECTION};

async fn owned_store() -> Arc<MemoryDocumentStore> {
    let store = Arc::new(MemoryDocumentStore::new());

    let mut mine = post_doc("mine-1", "Mine", 0, Some(100));
    mine.fields
        .insert("authorEmail".into(), "me@example.com".into());
    store.seed(POST_COLLECTION, mine).await;

    let mut also_mine = post_doc("mine-2", "Also mine", 0, Some(200));
    also_mine
        .fields
        .insert("authorEmail".into(), "me@example.com".into());
    store.seed(POST_COLLECTION, also_mine).await;

    let mut theirs = post_doc("theirs", "Not mine", 0, Some(300));
    theirs
        .fields
        .insert("authorEmail".into(), "them@example.com".into());
    store.seed(POST_COLLECTION, theirs).await;

    store
}

fn dashboard_over(store: &Arc<MemoryDocumentStore>) -> DashboardSynchronizer {
    let dyn_store: Arc<dyn DocumentStore> = store.clone();
    DashboardSynchronizer::new(dyn_store)
}

/// Test: only posts with the matching stored author email come back
#[tokio::test]
async fn owned_posts_are_filtered_by_email() {
    let store = owned_store().await;
    let mut dashboard = dashboard_over(&store);

    let posts = dashboard
        .load_owned_posts(Some("me@example.com"))
        .await
        .expect("load owned");

    let mut ids: Vec<&str> = posts.iter().map(|post| post.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["mine-1", "mine-2"]);
}

/// Test: absent email is a silent skip; no remote call is made at all
#[tokio::test]
async fn absent_email_returns_empty_without_touching_the_store() {
    let store = owned_store().await;
    store.fail_reads(true);

    let mut dashboard = dashboard_over(&store);

    let posts = dashboard.load_owned_posts(None).await.expect("silent skip");
    assert!(posts.is_empty());

    let posts = dashboard
        .load_owned_posts(Some(""))
        .await
        .expect("empty email is also a skip");
    assert!(posts.is_empty());
    assert!(dashboard.last_error().is_none());
}

/// Test: delete confirms remotely, then removes locally
#[tokio::test]
async fn delete_removes_remote_and_local() {
    let store = owned_store().await;
    let mut dashboard = dashboard_over(&store);
    dashboard
        .load_owned_posts(Some("me@example.com"))
        .await
        .expect("load owned");

    dashboard.delete_post("mine-1").await.expect("delete");

    assert_eq!(dashboard.posts().len(), 1);
    assert!(store
        .get_by_id(POST_COLLECTION, "mine-1")
        .await
        .expect("read")
        .is_none());
    // Someone else's post is untouched.
    assert!(store
        .get_by_id(POST_COLLECTION, "theirs")
        .await
        .expect("read")
        .is_some());
}

/// Test: ids outside the loaded owned set cannot be deleted through the
/// dashboard
#[tokio::test]
async fn delete_rejects_posts_outside_the_owned_set() {
    let store = owned_store().await;
    let mut dashboard = dashboard_over(&store);
    dashboard
        .load_owned_posts(Some("me@example.com"))
        .await
        .expect("load owned");

    let err = dashboard.delete_post("theirs").await.expect_err("must fail");
    assert!(matches!(err, HubError::NotFound(_)));

    assert!(store
        .get_by_id(POST_COLLECTION, "theirs")
        .await
        .expect("read")
        .is_some());
}

/// Test: a failed remote delete leaves the local owned set unchanged
#[tokio::test]
async fn failed_delete_keeps_local_state() {
    let store = owned_store().await;
    let mut dashboard = dashboard_over(&store);
    dashboard
        .load_owned_posts(Some("me@example.com"))
        .await
        .expect("load owned");

    store.fail_writes(true);
    let err = dashboard.delete_post("mine-1").await.expect_err("must fail");
    assert!(matches!(err, HubError::Write(_)));

    assert_eq!(dashboard.posts().len(), 2);
    assert!(dashboard.last_error().is_some());
}

/// Test: editing an owned post updates both sides
#[tokio::test]
async fn update_post_edits_remote_and_local() {
    let store = owned_store().await;
    let mut dashboard = dashboard_over(&store);
    dashboard
        .load_owned_posts(Some("me@example.com"))
        .await
        .expect("load owned");

    dashboard
        .update_post("mine-1", "  New title ", "New content")
        .await
        .expect("update");

    let local = dashboard
        .posts()
        .iter()
        .find(|post| post.id == "mine-1")
        .expect("still owned");
    assert_eq!(local.title, "New title");

    let remote = store
        .get_by_id(POST_COLLECTION, "mine-1")
        .await
        .expect("read")
        .expect("exists");
    assert_eq!(
        remote.fields.get("title").and_then(|v| v.as_str()),
        Some("New title")
    );
    assert_eq!(
        remote.fields.get("content").and_then(|v| v.as_str()),
        Some("New content")
    );
}

/// Test: blank edits are rejected before any remote call
#[tokio::test]
async fn update_post_rejects_blank_fields() {
    let store = owned_store().await;
    let mut dashboard = dashboard_over(&store);
    dashboard
        .load_owned_posts(Some("me@example.com"))
        .await
        .expect("load owned");

    let err = dashboard
        .update_post("mine-1", "   ", "content")
        .await
        .expect_err("must fail");
    assert!(matches!(err, HubError::Validation(_)));

    let err = dashboard
        .update_post("theirs", "title", "content")
        .await
        .expect_err("not owned");
    assert!(matches!(err, HubError::NotFound(_)));
}
