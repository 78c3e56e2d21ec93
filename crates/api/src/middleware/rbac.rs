//! Role gate.
//!
//! Each route group declares a minimum role; `admin` satisfies `operator`,
//! which satisfies `user`. Requires `UserAuth` in request extensions
//! (layer after `require_user_auth`).

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use domain::models::UserRole;
use serde_json::json;

use crate::middleware::user_auth::UserAuth;

/// Middleware that requires at least the operator role.
pub async fn require_operator(req: Request<Body>, next: Next) -> Response {
    require_role_impl(req, next, UserRole::Operator).await
}

/// Middleware that requires the admin role.
pub async fn require_admin(req: Request<Body>, next: Next) -> Response {
    require_role_impl(req, next, UserRole::Admin).await
}

async fn require_role_impl(req: Request<Body>, next: Next, min_role: UserRole) -> Response {
    let role = match req.extensions().get::<UserAuth>() {
        Some(auth) => auth.role,
        None => {
            tracing::warn!("Role gate called without UserAuth in extensions");
            return error_response(
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Authentication required",
            );
        }
    };

    if !role.allows(min_role) {
        tracing::debug!(role = %role, required = %min_role, "Role gate rejected request");
        return error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            &format!("This action requires the {} role", min_role),
        );
    }

    next.run(req).await
}

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": code,
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app(role: Option<UserRole>) -> Router {
        let inject = move |mut req: Request<Body>, next: Next| async move {
            if let Some(role) = role {
                req.extensions_mut().insert(UserAuth {
                    user_id: 1,
                    role,
                    jti: "jti".to_string(),
                });
            }
            next.run(req).await
        };

        Router::new()
            .route("/operator", get(|| async { "ok" }))
            .route_layer(middleware::from_fn(require_operator))
            .layer(middleware::from_fn(inject))
    }

    async fn status_for(role: Option<UserRole>) -> StatusCode {
        app(role)
            .oneshot(Request::builder().uri("/operator").body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_operator_gate() {
        assert_eq!(status_for(Some(UserRole::User)).await, StatusCode::FORBIDDEN);
        assert_eq!(status_for(Some(UserRole::Operator)).await, StatusCode::OK);
        assert_eq!(status_for(Some(UserRole::Admin)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_gate_without_auth() {
        assert_eq!(status_for(None).await, StatusCode::UNAUTHORIZED);
    }
}
