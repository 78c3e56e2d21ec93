//! JSON body extractor whose rejections use the API error format.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// Like `axum::Json`, but malformed bodies, unknown enum values and missing
/// fields become `400 validation_error` responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
