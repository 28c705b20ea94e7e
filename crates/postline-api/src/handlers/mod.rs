//! HTTP request handlers.

pub mod integrations;
pub mod media_upload;
pub mod posts;
