//! Postline Core Library
//!
//! This crate provides the domain models, provider settings variants,
//! submission validation, error types, and configuration shared across all
//! Postline components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod settings;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use settings::{ProviderSettings, SettingsError};
pub use validation::{validate_submission, ValidationError};
