//! Login and current-user routes.

use axum::{extract::State, Json};
use domain::models::user::{LoginRequest, LoginResponse, UserResponse};
use domain::models::User;
use persistence::repositories::UserRepository;
use shared::password::verify_login;
use tracing::{info, warn};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, CurrentUser};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Exchange a username and password for a bearer token.
///
/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;

    let repo = UserRepository::new(state.pool.clone());
    let entity = repo.find_by_username(&request.username).await?;

    let verified = verify_login(
        &request.password,
        entity.as_ref().map(|e| e.password_hash.as_str()),
    )
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    let Some(entity) = entity.filter(|_| verified) else {
        warn!(username = %request.username, "Login failed");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    let user: User = entity.into();
    let token = state
        .jwt
        .issue(user.id, user.role.as_str())
        .map_err(|e| ApiError::Internal(format!("Failed to issue token: {}", e)))?;

    info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(LoginResponse {
        success: true,
        user: user.into(),
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt.token_expiry_secs,
    }))
}

/// The authenticated user.
///
/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user: User = UserRepository::new(state.pool.clone())
        .find_by_id(current.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?
        .into();

    Ok(Json(user.into()))
}
