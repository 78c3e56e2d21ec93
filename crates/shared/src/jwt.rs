//! Session tokens (HS256 JWT).
//!
//! A token identifies the user and carries the role used by the route gate,
//! so handlers never consult global session state.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for token operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Role name at issue time
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    /// Unique token identifier
    pub jti: String,
}

impl Claims {
    /// Parses the numeric user ID from the subject claim.
    pub fn user_id(&self) -> Result<i64, JwtError> {
        self.sub.parse().map_err(|_| JwtError::InvalidToken)
    }
}

/// Minimum secret length accepted for HS256 signing.
pub const MIN_SECRET_LEN: usize = 32;

/// Signing and validation settings.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    pub token_expiry_secs: i64,
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("token_expiry_secs", &self.token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl JwtConfig {
    /// Creates a config from a shared secret.
    pub fn new(secret: &str, token_expiry_secs: i64, leeway_secs: u64) -> Result<Self, JwtError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(JwtError::InvalidKey(format!(
                "Secret must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry_secs,
            leeway_secs,
        })
    }

    /// Issues a token for the given user and role.
    pub fn issue(&self, user_id: i64, role: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_expiry_secs)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates a token and returns its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_secs;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret-unit-test-secret-0123";

    #[test]
    fn test_rejects_short_secret() {
        let result = JwtConfig::new("short", 3600, 0);
        assert!(matches!(result, Err(JwtError::InvalidKey(_))));
    }

    #[test]
    fn test_issue_and_validate() {
        let config = JwtConfig::new(SECRET, 3600, 0).unwrap();
        let token = config.issue(42, "operator").unwrap();

        let claims = config.validate(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.role, "operator");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tokens_have_unique_jti() {
        let config = JwtConfig::new(SECRET, 3600, 0).unwrap();
        let a = config.validate(&config.issue(1, "admin").unwrap()).unwrap();
        let b = config.validate(&config.issue(1, "admin").unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_expired_token() {
        let config = JwtConfig::new(SECRET, -120, 0).unwrap();
        let token = config.issue(1, "user").unwrap();
        assert!(matches!(config.validate(&token), Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_token_signed_with_other_secret() {
        let issuer = JwtConfig::new(SECRET, 3600, 0).unwrap();
        let other = JwtConfig::new("another-secret-another-secret-987654", 3600, 0).unwrap();
        let token = issuer.issue(1, "admin").unwrap();
        assert!(matches!(other.validate(&token), Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token() {
        let config = JwtConfig::new(SECRET, 3600, 0).unwrap();
        assert!(matches!(
            config.validate("not.a.token"),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::new(SECRET, 3600, 30).unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(SECRET));
    }
}
