//! Common error types and handling for Jobboard

use axum::http::StatusCode;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Jobboard application
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Get the HTTP status code reported in the response envelope.
    ///
    /// Only missing entities and ownership mismatches get a dedicated code;
    /// validation and store failures are both reported as 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Validation(_) | Error::Database(_) | Error::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code used in logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Database(_) => "DATABASE_ERROR",
            Error::Store(_) => "STORE_ERROR",
            Error::Unauthorized(_) => "UNAUTHORIZED",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
        }
    }

    /// Message carried by the error without the variant prefix.
    ///
    /// Not-found and unauthorized envelopes use it as their `msg`.
    pub fn detail(&self) -> String {
        match self {
            Error::Store(msg)
            | Error::Unauthorized(msg)
            | Error::Validation(msg)
            | Error::NotFound(msg) => msg.clone(),
            Error::Database(e) => e.to_string(),
        }
    }
}
