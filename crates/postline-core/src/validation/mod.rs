//! Submission shape validation
//!
//! Checks a raw ingestion request against the structural rules before any
//! side effect runs: no media is fetched and nothing is persisted for a
//! submission that fails here.

mod content;
mod error;
mod submission;

pub use content::{is_effectively_empty, is_valid_media_url};
pub use error::ValidationError;
pub use submission::{validate_submission, validate_submission_at};
