//! Custom axum extractors for Jobboard
//!
//! Every rejection is reported with the response envelope instead of axum's
//! plain-text rejection bodies.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};

use crate::ApiError;

/// Default page size for list endpoints
const DEFAULT_LIMIT: i64 = 10;

/// Maximum page size for list endpoints
const MAX_LIMIT: i64 = 100;

/// Page-based pagination parameters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl Pagination {
    /// Get the 1-based page, treating 0 (and anything below) as the first page
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Get the limit, defaulting to 10, capped at 100
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Row offset of the first record on the page.
    ///
    /// Saturates instead of overflowing, so an absurd page is simply empty.
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

/// JSON body extractor with envelope rejections.
///
/// Only the shape of the body is checked here. Field rules belong to the
/// domain, which runs them after its lookup and ownership checks.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_input(e.body_text()))?;
        Ok(JsonBody(value))
    }
}

/// Path extractor with envelope rejections
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_input(e.body_text()))?;
        Ok(ValidatedPath(value))
    }
}

/// Query-string extractor with envelope rejections
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_input(e.body_text()))?;
        Ok(ValidatedQuery(value))
    }
}
