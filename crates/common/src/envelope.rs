//! Uniform JSON response envelope
//!
//! Every endpoint answers with `{ ok, data?, msg, error? }`. Successful
//! operations carry their result in `data`; failures carry a human-readable
//! `msg` and, for validation and store failures, the underlying failure text
//! in `error`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Response body shared by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T, msg: impl Into<String>) -> Self {
        Self {
            ok: true,
            data: Some(data),
            msg: msg.into(),
            error: None,
        }
    }
}

/// Successful handler output: a 200 envelope with data
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    body: Envelope<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: Envelope::success(data, msg),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn envelope(&self) -> &Envelope<T> {
        &self.body
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Failed handler output: a non-2xx envelope with `ok: false`
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub msg: String,
    pub error: Option<String>,
}

impl ApiError {
    /// Degrade a typed error into an envelope.
    ///
    /// Not-found and unauthorized errors keep their own message; every other
    /// failure reports `failure_msg` and exposes the error text in `error`.
    pub fn from_error(err: Error, failure_msg: &str) -> Self {
        match err {
            Error::NotFound(_) | Error::Unauthorized(_) => Self {
                status: err.status_code(),
                msg: err.detail(),
                error: None,
            },
            other => {
                tracing::error!(
                    code = other.error_code(),
                    error = %other,
                    "{}",
                    failure_msg
                );
                Self {
                    status: other.status_code(),
                    msg: failure_msg.to_string(),
                    error: Some(other.detail()),
                }
            }
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            msg: msg.into(),
            error: None,
        }
    }

    /// Malformed input (body, path or query) rejected before reaching a handler
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            msg: "Invalid request".to_string(),
            error: Some(detail.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body: Envelope<()> = Envelope {
            ok: false,
            data: None,
            msg: self.msg,
            error: self.error,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Handler result type
pub type ApiResult<T> = std::result::Result<ApiResponse<T>, ApiError>;

/// Attach the operation's failure message to a domain result
pub trait ResultExt<T> {
    fn or_fail(self, failure_msg: &str) -> std::result::Result<T, ApiError>;
}

impl<T> ResultExt<T> for crate::Result<T> {
    fn or_fail(self, failure_msg: &str) -> std::result::Result<T, ApiError> {
        self.map_err(|e| ApiError::from_error(e, failure_msg))
    }
}
