//! Ingestion services.
//!
//! The pipeline is wired through trait seams so the orchestration logic can
//! be exercised without a database or network.

pub mod adapters;
pub mod ingest;
pub mod media_resolver;
pub mod traits;

pub use adapters::{DbIntegrationDirectory, DbMediaStore, DbPostStore, HttpFetcher};
pub use ingest::IngestService;
pub use media_resolver::MediaResolver;
pub use traits::{FetchedMedia, IntegrationDirectory, MediaStore, PostStore, UrlFetcher};
