//! Authentication extractors
//!
//! Extracts and verifies bearer tokens from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use elithe_common::AppError;
use elithe_core::MemberRole;
use uuid::Uuid;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated member extracted from the bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub member_id: Uuid,
    pub role: MemberRole,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(member_id: Uuid, role: MemberRole) -> Self {
        Self { member_id, role }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Authorization header
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let identity = app_state
            .identity_verifier()
            .verify(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected bearer token");
                ApiError::App(AppError::from(e))
            })?;

        Ok(AuthUser::new(identity.member_id, identity.role))
    }
}

/// Authenticated member holding the admin role
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !user.role.is_admin() {
            tracing::warn!(member_id = %user.member_id, "Admin route denied");
            return Err(ApiError::App(AppError::InsufficientPermissions));
        }

        Ok(AdminUser(user))
    }
}
