//! Shared utilities, configuration, and error handling for Jobboard
//!
//! This crate provides common functionality used across the Jobboard application:
//! - Configuration management following 12-factor principles
//! - Error types and their mapping to HTTP status codes
//! - The `{ ok, data, msg, error }` response envelope
//! - Extractors that reject malformed input with an envelope

pub mod config;
pub mod db;
pub mod envelope;
pub mod error;
pub mod extractors;

pub use db::RepositoryError;
pub use envelope::{ApiError, ApiResponse, ApiResult, Envelope, ResultExt};
pub use error::{Error, Result};
pub use extractors::{JsonBody, Pagination, ValidatedPath, ValidatedQuery};
