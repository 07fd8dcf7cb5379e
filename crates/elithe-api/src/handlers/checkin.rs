//! Check-in handlers
//!
//! Staff endpoints behind the QR scanner.

use axum::{extract::State, Json};
use elithe_service::dto::{CheckinRequest, RegisterResponse, ValidateResponse};
use elithe_service::CheckinService;

use crate::extractors::{AdminUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Validate a scanned credential without checking in
///
/// POST /checkin/validate
pub async fn validate(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CheckinRequest>,
) -> ApiResult<Json<ValidateResponse>> {
    let service = CheckinService::new(state.service_context());
    let response = service.validate(&request).await?;
    Ok(Json(response))
}

/// Register a check-in
///
/// POST /checkin/register
pub async fn register(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidatedJson(request): ValidatedJson<CheckinRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    let service = CheckinService::new(state.service_context());
    let response = service.register(&request).await?;

    tracing::info!(
        staff_id = %admin.member_id,
        confirmation_id = %response.checked_in.confirmation_id,
        "Check-in registered"
    );

    Ok(Json(response))
}
