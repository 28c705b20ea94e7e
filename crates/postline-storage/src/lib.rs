//! Postline Storage Library
//!
//! This crate provides the storage abstraction behind stored media and a
//! local filesystem implementation.
//!
//! # Storage key format
//!
//! Storage keys are organization-scoped: `media/{organization_id}/{filename}`.
//! Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module.

pub(crate) mod keys;
pub mod local;
pub mod traits;

pub use keys::generate_storage_key;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
