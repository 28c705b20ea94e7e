//! Postline API Library
//!
//! This crate provides the HTTP API handlers, the ingestion services, and the
//! application setup.

mod api_doc;
mod handlers;

pub mod auth;
pub mod constants;
pub mod error;
pub mod services;
pub mod setup;
pub mod state;

pub use error::ErrorResponse;
