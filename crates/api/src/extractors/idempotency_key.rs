//! Idempotency key header extractor.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::HeaderName, request::Parts},
};
use shared::crypto::idempotency_hash;

use crate::error::ApiError;

/// The header name for idempotency keys.
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

/// Longest accepted client token.
const MAX_KEY_LEN: usize = 255;

/// Client-supplied idempotency token.
#[derive(Debug, Clone)]
pub struct IdempotencyKey {
    /// The original key value from the header.
    pub original: String,
}

impl IdempotencyKey {
    pub fn new(original: String) -> Self {
        Self { original }
    }

    /// Storage hash, namespaced by ledger and caller so two users (or the two
    /// ledgers) never share a key.
    pub fn hash_for(&self, scope: &str, user_id: i64) -> String {
        idempotency_hash(scope, user_id, &self.original)
    }
}

/// Optional idempotency key extractor.
/// Returns `None` if the header is absent or blank.
#[derive(Debug, Clone)]
pub struct OptionalIdempotencyKey(pub Option<IdempotencyKey>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalIdempotencyKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_name = HeaderName::from_static(IDEMPOTENCY_KEY_HEADER);

        let Some(value) = parts.headers.get(&header_name) else {
            return Ok(OptionalIdempotencyKey(None));
        };

        let value = value
            .to_str()
            .map_err(|_| ApiError::Validation("Idempotency-Key must be ASCII".to_string()))?
            .trim();

        if value.is_empty() {
            return Ok(OptionalIdempotencyKey(None));
        }
        if value.len() > MAX_KEY_LEN {
            return Err(ApiError::Validation(format!(
                "Idempotency-Key must be at most {} characters",
                MAX_KEY_LEN
            )));
        }

        Ok(OptionalIdempotencyKey(Some(IdempotencyKey::new(
            value.to_string(),
        ))))
    }
}
