//! Postline Database Library
//!
//! Repository implementations for the data access layer. Each repository owns
//! one domain entity and issues runtime-checked queries against Postgres.

pub mod db;

pub use db::{IntegrationRepository, MediaRepository, PostRepository};
