//! Attendance handlers
//!
//! Endpoints members use to confirm a ride and fetch their check-in QR code.

use axum::{
    extract::{Path, State},
    Json,
};
use elithe_service::dto::{
    ConfirmAttendanceRequest, ConfirmResponse, CredentialResponse, StatusResponse,
};
use elithe_service::AttendanceService;

use crate::extractors::{AuthUser, EventIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Confirm attendance at an event
///
/// POST /events/{event_id}/attend
pub async fn confirm_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<EventIdPath>,
    ValidatedJson(request): ValidatedJson<ConfirmAttendanceRequest>,
) -> ApiResult<Created<Json<ConfirmResponse>>> {
    let event_id = path.event_id()?;

    let service = AttendanceService::new(state.service_context());
    let outcome = service.confirm(event_id, auth.member_id, request).await?;
    Ok(Created(Json(ConfirmResponse::from(outcome))))
}

/// Whether the caller confirmed an event
///
/// GET /events/{event_id}/status
pub async fn get_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<EventIdPath>,
) -> ApiResult<Json<StatusResponse>> {
    let event_id = path.event_id()?;

    let service = AttendanceService::new(state.service_context());
    let response = service.get_status(event_id, auth.member_id).await?;
    Ok(Json(response))
}

/// Get (or regenerate) the caller's check-in credential
///
/// GET /events/{event_id}/credential
pub async fn get_credential(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<EventIdPath>,
) -> ApiResult<Json<CredentialResponse>> {
    let event_id = path.event_id()?;

    let service = AttendanceService::new(state.service_context());
    let response = service.credential(event_id, auth.member_id).await?;
    Ok(Json(response))
}
