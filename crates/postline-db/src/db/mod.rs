//! Database repositories for data access layer
//!
//! Repositories are organized per domain entity. Every query is scoped by
//! organization id so one organization can never read or write another's rows.

pub mod integration;
pub mod media;
pub mod post;

pub use integration::IntegrationRepository;
pub use media::MediaRepository;
pub use post::PostRepository;
