//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain. Each sub-module represents a specific feature area.

mod integration;
mod media;
mod post;

// Re-export all models for convenient imports
pub use integration::*;
pub use media::*;
pub use post::*;
