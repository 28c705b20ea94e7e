//! Application state.
//!
//! State is split into small domain sub-structs so setup code and handlers
//! stay readable; handlers receive the whole thing behind an `Arc`.

use std::sync::Arc;

use postline_core::Config;
use postline_db::{IntegrationRepository, MediaRepository, PostRepository};
use postline_storage::Storage;
use sqlx::PgPool;

use crate::services::{IngestService, MediaStore, PostStore};

/// Database pool and repositories.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub posts: PostRepository,
    pub media: MediaRepository,
    pub integrations: IntegrationRepository,
}

/// Blob storage plus upload limits.
#[derive(Clone)]
pub struct MediaState {
    pub storage: Arc<dyn Storage>,
    pub store: Arc<dyn MediaStore>,
    pub max_upload_bytes: usize,
    pub allowed_content_types: Vec<String>,
}

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DbState,
    pub media: MediaState,
    pub ingest: IngestService,
    /// Post persistence seam; shared with the ingest service, and used by
    /// the delete handler for the post-to-group resolution.
    pub posts: Arc<dyn PostStore>,
}
