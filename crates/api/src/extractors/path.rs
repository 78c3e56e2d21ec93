//! Path parameter extractor whose rejections use the API error format.

use axum::extract::FromRequestParts;

use crate::error::ApiError;

/// Like `axum::extract::Path`, but a segment that does not parse becomes a
/// `400 validation_error` response.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);
