/// Write-Hub Sync Core
///
/// This library implements the data-synchronization layer of the Write-Hub
/// blogging application: the logic sitting between the view layer and the
/// remote backend services (authentication, document store, object storage).
///
/// It handles:
/// - Session lifecycle (login / signup / logout) against a remote auth provider
/// - Loading and ordering the public post feed
/// - Like counting with device-local duplicate prevention
/// - The owner dashboard (owned posts, delete, edit)
/// - Post composition with optional media upload
///
/// Remote services are reached through the traits in [`services`]; in-memory
/// backends for tests and local development live in [`services::memory`].
pub mod composer;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod feed;
pub mod likes;
pub mod models;
pub mod services;
pub mod session;

pub use composer::PostComposer;
pub use config::HubConfig;
pub use dashboard::DashboardSynchronizer;
pub use error::{HubError, Result};
pub use feed::FeedSynchronizer;
pub use likes::LikeRecord;
pub use models::{MediaFile, Post, PostDraft, UserProfile, POST_COLLECTION};
pub use session::SessionContext;
