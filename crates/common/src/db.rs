//! Shared database types for Jobboard
//!
//! This module provides common store-level error types used by every store backend.

use crate::error::Error;
use thiserror::Error;

/// Store-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Foreign key violation: {0}")]
    ForeignKey(String),
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ForeignKey(msg) => Error::Store(msg),
        }
    }
}
