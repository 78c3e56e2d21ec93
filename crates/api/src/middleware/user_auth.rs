//! Bearer token authentication middleware.
//!
//! Validates the JWT on every protected route and stores the caller's
//! identity in request extensions for the role gate and handlers.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use domain::models::UserRole;
use serde_json::json;
use shared::jwt::JwtConfig;

use crate::app::AppState;

/// Authenticated user information extracted from the JWT.
#[derive(Debug, Clone)]
pub struct UserAuth {
    /// User ID from the JWT subject claim.
    pub user_id: i64,
    /// Role at the time the token was issued.
    pub role: UserRole,
    /// JWT ID (jti) for log correlation.
    pub jti: String,
}

impl UserAuth {
    /// Validates a token and returns the caller's identity.
    pub fn validate(jwt_config: &JwtConfig, token: &str) -> Result<Self, String> {
        let claims = jwt_config
            .validate(token)
            .map_err(|e| format!("Invalid token: {}", e))?;

        let user_id = claims
            .user_id()
            .map_err(|_| "Invalid user ID in token".to_string())?;
        let role = claims
            .role
            .parse::<UserRole>()
            .map_err(|_| "Invalid role in token".to_string())?;

        Ok(UserAuth {
            user_id,
            role,
            jti: claims.jti,
        })
    }
}

/// Middleware that requires a valid Bearer token.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(Authorization(bearer)) = req.headers().typed_get::<Authorization<Bearer>>() else {
        return unauthorized_response("Missing or invalid Authorization header");
    };

    match UserAuth::validate(&state.jwt, bearer.token()) {
        Ok(auth) => {
            tracing::Span::current().record("user_id", auth.user_id);
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            unauthorized_response("Invalid or expired token")
        }
    }
}

/// Helper to create unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "success": false,
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-with-at-least-32-bytes!!";

    fn jwt() -> JwtConfig {
        JwtConfig::new(SECRET, 3600, 0).unwrap()
    }

    #[test]
    fn test_unauthorized_response() {
        let response = unauthorized_response("Test message");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_validate_round_trip() {
        let config = jwt();
        let token = config.issue(42, "operator").unwrap();
        let auth = UserAuth::validate(&config, &token).unwrap();
        assert_eq!(auth.user_id, 42);
        assert_eq!(auth.role, UserRole::Operator);
        assert!(!auth.jti.is_empty());
    }

    #[test]
    fn test_validate_rejects_unknown_role() {
        let config = jwt();
        let token = config.issue(1, "superuser").unwrap();
        let err = UserAuth::validate(&config, &token).unwrap_err();
        assert!(err.contains("role"));
    }

    #[test]
    fn test_validate_rejects_foreign_signature() {
        let other = JwtConfig::new("another-secret-key-with-32-bytes-or-more", 3600, 0).unwrap();
        let token = other.issue(1, "admin").unwrap();
        assert!(UserAuth::validate(&jwt(), &token).is_err());
    }
}
