//! Unified error handling for the Write-Hub sync core
//!
//! Every remote-call failure is caught at the synchronizer/composer boundary
//! and converted into one of these variants; nothing propagates as a panic to
//! the view layer, and no operation retries automatically.

use thiserror::Error;

/// Result type alias for sync-core operations
pub type Result<T> = std::result::Result<T, HubError>;

/// Error taxonomy for the sync core
///
/// `Display` output is the user-visible message; callers must not match on
/// specific text, only on the variant.
#[derive(Error, Debug)]
pub enum HubError {
    /// Authentication failed (invalid credentials, duplicate account,
    /// expired session); carries the provider-supplied message
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// An operation requiring a session was attempted without one
    #[error("You must be signed in to perform this action")]
    NotAuthenticated,

    /// Network or store read failure
    #[error("Failed to fetch posts: {0}")]
    Fetch(String),

    /// Insert, update or delete failure
    #[error("Write failed: {0}")]
    Write(String),

    /// Object store failure
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Referenced post id does not exist
    #[error("Post not found: {0}")]
    NotFound(String),

    /// Input rejected before any remote call was made
    #[error("Validation error: {0}")]
    Validation(String),
}

impl HubError {
    /// True when the error indicates a missing resource rather than a fault
    pub fn is_not_found(&self) -> bool {
        matches!(self, HubError::NotFound(_))
    }
}

impl From<validator::ValidationErrors> for HubError {
    fn from(errors: validator::ValidationErrors) -> Self {
        HubError::Validation(errors.to_string())
    }
}
