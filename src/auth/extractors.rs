use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::{
    auth::{jwt::JwtKeys, repo::User},
    error::ApiError,
    state::AppState,
};

/// Authenticated requester. Verifies the bearer token, then loads the user
/// row it names; a token whose subject no longer exists is rejected.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::Unauthorized("missing authorization header"))?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or(ApiError::Unauthorized("invalid authorization scheme"))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|_| {
            warn!("token verification failed");
            ApiError::Unauthorized("invalid or expired token")
        })?;

        let user = User::find_by_id(&state.db, claims.sub)
            .await?
            .ok_or(ApiError::Unauthorized("user not found"))?;

        Ok(CurrentUser(user))
    }
}

/// Authenticated requester proven to hold the admin role.
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        require_admin(&user)?;
        Ok(AdminUser(user))
    }
}

/// Denies a caller whose role is not admin. The caller is already
/// authenticated here, so the refusal is a 403 and never a 401.
pub fn require_admin(user: &User) -> Result<(), ApiError> {
    if user.role.is_admin() {
        Ok(())
    } else {
        warn!(user_id = %user.id, "admin access denied");
        Err(ApiError::Forbidden)
    }
}
