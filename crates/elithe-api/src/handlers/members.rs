//! Member handlers

use axum::{extract::State, Json};
use elithe_service::dto::{BadgeResponse, MemberResponse};
use elithe_service::MemberService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the caller's profile
///
/// GET /members/@me
pub async fn get_current_member(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MemberResponse>> {
    let service = MemberService::new(state.service_context());
    let response = service.get_profile(auth.member_id).await?;
    Ok(Json(response))
}

/// Get the caller's badge QR code
///
/// GET /members/@me/badge
pub async fn get_badge(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<BadgeResponse>> {
    let service = MemberService::new(state.service_context());
    let response = service.badge(auth.member_id).await?;
    Ok(Json(response))
}
