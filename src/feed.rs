//! Public post feed
//!
//! Fetches every post, orders newest-first, and applies like increments with
//! device-local duplicate prevention. The like counter is a client
//! read-modify-write against the store's `update` — the store interface has
//! no atomic increment — so concurrent likes from different devices on the
//! same post can under-count. Known property, kept as-is.

use std::sync::Arc;

use serde_json::Map;
use tracing::{info, warn};

use crate::error::{HubError, Result};
use crate::likes::LikeRecord;
use crate::models::{Post, POST_COLLECTION};
use crate::services::DocumentStore;

/// Synchronizer behind the public feed views
pub struct FeedSynchronizer {
    store: Arc<dyn DocumentStore>,
    likes: LikeRecord,
    posts: Vec<Post>,
    last_error: Option<String>,
}

impl FeedSynchronizer {
    pub fn new(store: Arc<dyn DocumentStore>, likes: LikeRecord) -> Self {
        Self {
            store,
            likes,
            posts: Vec::new(),
            last_error: None,
        }
    }

    /// Fetch all posts, newest first.
    ///
    /// Posts without a timestamp sort as oldest (epoch); ties keep store
    /// iteration order. On failure the previously loaded feed is kept and
    /// the error is also recorded in [`Self::last_error`].
    pub async fn load_feed(&mut self) -> Result<&[Post]> {
        self.last_error = None;

        let documents = match self.store.get_all(POST_COLLECTION).await {
            Ok(documents) => documents,
            Err(e) => return Err(self.fail(e)),
        };

        let mut posts: Vec<Post> = documents.iter().map(Post::from_document).collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        info!("Loaded {} posts", posts.len());
        self.posts = posts;
        Ok(&self.posts)
    }

    /// Fetch one post for the detail view
    pub async fn load_post(&mut self, post_id: &str) -> Result<Post> {
        self.last_error = None;

        match self.store.get_by_id(POST_COLLECTION, post_id).await {
            Ok(Some(document)) => Ok(Post::from_document(&document)),
            Ok(None) => Err(self.fail(HubError::NotFound(post_id.to_string()))),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Like a post once per device; returns the post's like count.
    ///
    /// Already-liked ids are a no-op. Otherwise the incremented count is
    /// confirmed remotely first; only then are the local feed state and the
    /// like record updated.
    pub async fn like(&mut self, post_id: &str) -> Result<u32> {
        self.last_error = None;

        let current = self
            .posts
            .iter()
            .find(|post| post.id == post_id)
            .map(|post| post.likes);

        if self.likes.contains(post_id) {
            return Ok(current.unwrap_or(0));
        }

        let Some(current) = current else {
            return Err(self.fail(HubError::NotFound(post_id.to_string())));
        };

        let incremented = current + 1;
        let mut fields = Map::new();
        fields.insert("likes".to_string(), serde_json::json!(incremented));

        if let Err(e) = self.store.update(POST_COLLECTION, post_id, fields).await {
            warn!("Failed to like {post_id}: {e}");
            return Err(self.fail(e));
        }

        if let Some(post) = self.posts.iter_mut().find(|post| post.id == post_id) {
            post.likes = incremented;
        }
        self.likes.record(post_id);

        Ok(incremented)
    }

    /// Whether this device already liked the post
    pub fn has_liked(&self, post_id: &str) -> bool {
        self.likes.contains(post_id)
    }

    /// Last loaded feed state
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// User-visible message for the most recent failure, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn fail(&mut self, error: HubError) -> HubError {
        self.last_error = Some(error.to_string());
        error
    }
}
