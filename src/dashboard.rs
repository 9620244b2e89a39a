//! Owner dashboard
//!
//! The authenticated owner's view of their own posts. Ownership is enforced
//! here: delete and edit only accept ids present in the loaded owned set, so
//! a caller can never mutate somebody else's post through this synchronizer.
//! All mutations confirm remotely before touching local state.

use std::sync::Arc;

use serde_json::Map;
use tracing::{info, warn};

use crate::error::{HubError, Result};
use crate::models::{Post, AUTHOR_EMAIL_FIELD, POST_COLLECTION};
use crate::services::DocumentStore;

/// Synchronizer behind the owner dashboard
pub struct DashboardSynchronizer {
    store: Arc<dyn DocumentStore>,
    posts: Vec<Post>,
    last_error: Option<String>,
}

impl DashboardSynchronizer {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            posts: Vec::new(),
            last_error: None,
        }
    }

    /// Fetch the posts owned by `user_email`, unsorted.
    ///
    /// With no email (no session) this is a silent skip: the owned set is
    /// cleared and no remote call is made.
    pub async fn load_owned_posts(&mut self, user_email: Option<&str>) -> Result<&[Post]> {
        self.last_error = None;

        let Some(email) = user_email.filter(|email| !email.is_empty()) else {
            self.posts.clear();
            return Ok(&self.posts);
        };

        let documents = match self
            .store
            .query(POST_COLLECTION, AUTHOR_EMAIL_FIELD, &serde_json::json!(email))
            .await
        {
            Ok(documents) => documents,
            Err(e) => return Err(self.fail(e)),
        };

        self.posts = documents.iter().map(Post::from_document).collect();
        info!("Loaded {} owned posts for {email}", self.posts.len());
        Ok(&self.posts)
    }

    /// Delete an owned post.
    ///
    /// The id must be in the loaded owned set. The remote delete is
    /// confirmed first; on failure local state is left unchanged.
    pub async fn delete_post(&mut self, post_id: &str) -> Result<()> {
        self.last_error = None;
        self.owned(post_id)?;

        if let Err(e) = self.store.delete(POST_COLLECTION, post_id).await {
            warn!("Failed to delete {post_id}: {e}");
            return Err(self.fail(e));
        }

        self.posts.retain(|post| post.id != post_id);
        info!("Deleted post {post_id}");
        Ok(())
    }

    /// Edit the title and content of an owned post
    pub async fn update_post(&mut self, post_id: &str, title: &str, content: &str) -> Result<()> {
        self.last_error = None;
        self.owned(post_id)?;

        let title = title.trim();
        let content = content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(self.fail(HubError::Validation(
                "title and content are required".to_string(),
            )));
        }

        let mut fields = Map::new();
        fields.insert("title".to_string(), serde_json::json!(title));
        fields.insert("content".to_string(), serde_json::json!(content));

        if let Err(e) = self.store.update(POST_COLLECTION, post_id, fields).await {
            warn!("Failed to update {post_id}: {e}");
            return Err(self.fail(e));
        }

        if let Some(post) = self.posts.iter_mut().find(|post| post.id == post_id) {
            post.title = title.to_string();
            post.content = content.to_string();
        }
        Ok(())
    }

    /// Last loaded owned set
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// User-visible message for the most recent failure, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn owned(&mut self, post_id: &str) -> Result<()> {
        if self.posts.iter().any(|post| post.id == post_id) {
            return Ok(());
        }
        Err(self.fail(HubError::NotFound(post_id.to_string())))
    }

    fn fail(&mut self, error: HubError) -> HubError {
        self.last_error = Some(error.to_string());
        error
    }
}
