//! Post composition
//!
//! Validates a draft and writes it to the document store, uploading the
//! media attachment first when there is one. A failed submission keeps the
//! draft intact so the caller can retry without re-entering anything; a
//! successful one resets it.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};
use validator::Validate;

use crate::error::{HubError, Result};
use crate::models::{MediaFile, PostDraft, AUTHOR_EMAIL_FIELD, POST_COLLECTION};
use crate::services::{DocumentStore, ObjectStore};
use crate::session::SessionContext;

/// Builder for new posts
pub struct PostComposer {
    store: Arc<dyn DocumentStore>,
    objects: Arc<dyn ObjectStore>,
    draft: PostDraft,
}

impl PostComposer {
    pub fn new(store: Arc<dyn DocumentStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            objects,
            draft: PostDraft::default(),
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.draft.title = title.to_string();
    }

    pub fn set_content(&mut self, content: &str) {
        self.draft.content = content.to_string();
    }

    /// Byline override; left empty, the session display name is used
    pub fn set_author(&mut self, author: &str) {
        self.draft.author = author.to_string();
    }

    pub fn attach_media(&mut self, media: MediaFile) {
        self.draft.media = Some(media);
    }

    pub fn clear_media(&mut self) {
        self.draft.media = None;
    }

    /// Current draft state
    pub fn draft(&self) -> &PostDraft {
        &self.draft
    }

    /// Submit the draft as a new post; returns the assigned post id.
    ///
    /// Requires an authenticated session. When media is attached it is
    /// uploaded and its URL resolved before the document is written, so a
    /// post declaring media is never created without it; an upload failure
    /// aborts the whole submission.
    pub async fn submit(&mut self, session: &SessionContext) -> Result<String> {
        let user = session
            .current_user()
            .ok_or(HubError::NotAuthenticated)?
            .clone();

        self.draft.validate()?;

        if let Some(media) = &self.draft.media {
            if !media.is_supported() {
                return Err(HubError::Validation(format!(
                    "unsupported media type '{}'; only images and videos are accepted",
                    media.content_type
                )));
            }
        }

        let mut image_url = None;
        let mut media_type = None;
        if let Some(media) = self.draft.media.clone() {
            image_url = Some(self.upload_media(&user.uid, &media).await?);
            media_type = Some(media.content_type);
        }

        let author = match self.draft.author.trim() {
            "" => user
                .display_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or("Anonymous")
                .to_string(),
            byline => byline.to_string(),
        };

        let mut fields = Map::new();
        fields.insert("title".to_string(), Value::from(self.draft.title.trim()));
        fields.insert(
            "content".to_string(),
            Value::from(self.draft.content.trim()),
        );
        fields.insert("author".to_string(), Value::from(author));
        fields.insert("authorId".to_string(), Value::from(user.uid.as_str()));
        fields.insert(
            AUTHOR_EMAIL_FIELD.to_string(),
            Value::from(user.email.as_str()),
        );
        fields.insert("likes".to_string(), Value::from(0));
        // Reserved for per-post like attribution; duplicate prevention
        // currently lives in the device-local like record.
        fields.insert("likedBy".to_string(), Value::Array(Vec::new()));
        fields.insert(
            "imageUrl".to_string(),
            image_url.clone().map(Value::from).unwrap_or(Value::Null),
        );
        fields.insert(
            "mediaType".to_string(),
            media_type.map(Value::from).unwrap_or(Value::Null),
        );
        // createdAt is assigned server-side on insert.

        let id = match self.store.insert(POST_COLLECTION, fields).await {
            Ok(id) => id,
            Err(e) => {
                if image_url.is_some() {
                    // Accepted cleanup gap: the uploaded object now has no
                    // referencing document.
                    warn!("Post insert failed after media upload: {e}");
                }
                return Err(e);
            }
        };

        info!("Created post {id}");
        self.draft = PostDraft::default();
        Ok(id)
    }

    async fn upload_media(&self, uid: &str, media: &MediaFile) -> Result<String> {
        // Namespaced by owner and original file name; reusing a name
        // overwrites the previous object.
        let path = format!("post/{uid}/{}", media.name);
        let handle = self
            .objects
            .upload(&path, media.bytes.clone(), &media.content_type)
            .await?;
        self.objects.resolve_url(&handle).await
    }
}
