//! Authenticated caller extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::UserRole;

use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth as UserAuthData;

/// The caller, as established by `require_user_auth`.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: i64,
    pub role: UserRole,
}

impl CurrentUser {
    /// Resolve the operator for a ledger write: the caller by default,
    /// another user only for admins.
    pub fn resolve_operator(&self, requested: Option<i64>) -> Result<i64, ApiError> {
        match requested {
            None => Ok(self.user_id),
            Some(id) if id == self.user_id => Ok(id),
            Some(id) if self.role.allows(UserRole::Admin) => Ok(id),
            Some(_) => Err(ApiError::Forbidden(
                "Only an admin may record on behalf of another user".to_string(),
            )),
        }
    }
}

impl From<&UserAuthData> for CurrentUser {
    fn from(data: &UserAuthData) -> Self {
        Self {
            user_id: data.user_id,
            role: data.role,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserAuthData>()
            .map(CurrentUser::from)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}
