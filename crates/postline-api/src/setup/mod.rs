//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::Result;
use postline_core::Config;
use postline_db::{IntegrationRepository, MediaRepository, PostRepository};
use postline_storage::{LocalStorage, Storage};

use crate::services::{
    DbIntegrationDirectory, DbMediaStore, DbPostStore, HttpFetcher, IngestService, MediaResolver,
    PostStore,
};
use crate::state::{AppState, DbState, MediaState};

/// Initialize structured logging. RUST_LOG overrides the default filter.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    fmt().with_env_filter(filter).init();
}

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let pool = database::setup_database(&config).await?;

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(config.storage_path.clone(), config.storage_base_url.clone()).await?,
    );

    let posts = PostRepository::new(pool.clone());
    let media = MediaRepository::new(pool.clone());
    let integrations = IntegrationRepository::new(pool.clone());

    let media_store = Arc::new(DbMediaStore::new(storage.clone(), media.clone()));

    let fetcher = Arc::new(HttpFetcher::new(
        config.media_fetch_timeout_secs,
        config.allowed_content_types.clone(),
        config.media_max_fetch_bytes,
    )?);
    let resolver = Arc::new(MediaResolver::new(fetcher, media_store.clone()));

    let post_store: Arc<dyn PostStore> = Arc::new(DbPostStore::new(posts.clone()));

    let ingest = IngestService::new(
        Arc::new(DbIntegrationDirectory::new(integrations.clone())),
        resolver,
        post_store.clone(),
    );

    let state = Arc::new(AppState {
        db: DbState {
            pool,
            posts,
            media,
            integrations,
        },
        media: MediaState {
            storage,
            store: media_store,
            max_upload_bytes: config.max_upload_bytes,
            allowed_content_types: config.allowed_content_types.clone(),
        },
        ingest,
        posts: post_store,
        config,
    });

    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}
