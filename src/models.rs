//! Data model for the Write-Hub sync core
//!
//! Posts live in the remote document store as schemaless JSON documents;
//! mapping into [`Post`] is deliberately tolerant so that legacy or
//! hand-edited records never break the feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

use crate::services::Document;

/// Collection holding post documents
pub const POST_COLLECTION: &str = "post";

/// Document field the dashboard filters ownership on
pub const AUTHOR_EMAIL_FIELD: &str = "authorEmail";

/// Preview length used by the public blog view
pub const BLOG_PREVIEW_CHARS: usize = 150;

/// Preview length used by the homepage
pub const HOME_PREVIEW_CHARS: usize = 100;

/// A single blog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    /// Opaque id assigned by the document store on creation
    pub id: String,
    pub title: String,
    pub content: String,
    /// Display name shown in the feed; "Anonymous" when absent
    pub author: String,
    /// Owner identity, immutable after creation
    pub author_id: String,
    /// Owner email, used by the dashboard ownership query
    pub author_email: Option<String>,
    /// Server-assigned creation time; legacy records without one map to
    /// the Unix epoch so they sort oldest
    pub created_at: DateTime<Utc>,
    pub image_url: Option<String>,
    pub media_type: Option<String>,
    /// Non-negative like counter; only ever incremented by this system
    pub likes: u32,
}

impl Post {
    /// Map a raw document into a `Post`, defaulting every absent field.
    ///
    /// Never fails: a malformed record yields a post with empty text,
    /// "Anonymous" author, zero likes and an epoch timestamp.
    pub fn from_document(doc: &Document) -> Self {
        let fields = &doc.fields;

        Self {
            id: doc.id.clone(),
            title: string_field(fields, "title"),
            content: string_field(fields, "content"),
            author: match fields.get("author").and_then(Value::as_str) {
                Some(author) if !author.is_empty() => author.to_string(),
                _ => "Anonymous".to_string(),
            },
            author_id: string_field(fields, "authorId"),
            author_email: optional_string_field(fields, AUTHOR_EMAIL_FIELD),
            created_at: parse_created_at(fields.get("createdAt")),
            image_url: optional_string_field(fields, "imageUrl"),
            media_type: optional_string_field(fields, "mediaType"),
            likes: fields
                .get("likes")
                .and_then(Value::as_i64)
                .unwrap_or(0)
                .max(0) as u32,
        }
    }

    /// Feed preview of the post content.
    ///
    /// Content at or under `max_chars` is returned in full with no ellipsis;
    /// longer content is cut on a character boundary and suffixed with `…`.
    pub fn preview(&self, max_chars: usize) -> String {
        if self.content.chars().count() <= max_chars {
            return self.content.clone();
        }

        let cut: String = self.content.chars().take(max_chars).collect();
        format!("{cut}…")
    }
}

fn string_field(fields: &Map<String, Value>, name: &str) -> String {
    fields
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn optional_string_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Parse the document store's timestamp shape (`{"seconds": n}`), accepting
/// a bare integer as well; anything else is treated as the epoch.
fn parse_created_at(value: Option<&Value>) -> DateTime<Utc> {
    let seconds = match value {
        Some(Value::Object(map)) => map.get("seconds").and_then(Value::as_i64).unwrap_or(0),
        Some(Value::Number(number)) => number.as_i64().unwrap_or(0),
        _ => 0,
    };

    DateTime::from_timestamp(seconds, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

/// The current authenticated user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// Identity assigned by the auth provider
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// One media attachment for a new post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// Original file name; reused names overwrite (last-write-wins)
    pub name: String,
    /// Declared MIME type, e.g. `image/png`
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    /// Only images and videos are accepted as post media
    pub fn is_supported(&self) -> bool {
        match self.content_type.parse::<mime::Mime>() {
            Ok(parsed) => parsed.type_() == mime::IMAGE || parsed.type_() == mime::VIDEO,
            Err(_) => false,
        }
    }
}

/// In-progress composer state; survives failed submissions so the user can
/// retry without re-entering data
#[derive(Debug, Clone, Default, Validate)]
pub struct PostDraft {
    #[validate(custom(function = "non_blank"))]
    pub title: String,
    #[validate(custom(function = "non_blank"))]
    pub content: String,
    /// Optional byline override; defaults to the session display name
    pub author: String,
    pub media: Option<MediaFile>,
}

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("non_blank"));
    }
    Ok(())
}
