//! Event handlers
//!
//! Endpoints for the active ride and event administration.

use axum::{
    extract::{Path, State},
    Json,
};
use elithe_service::dto::{AttendanceEntryResponse, CreateEventRequest, EventResponse};
use elithe_service::EventService;

use crate::extractors::{AdminUser, AuthUser, EventIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Get the active event
///
/// GET /events/active
pub async fn get_active_event(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.get_active().await?;
    Ok(Json(response))
}

/// List all events
///
/// GET /events
pub async fn list_events(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.list_events().await?;
    Ok(Json(response))
}

/// Create a new event
///
/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> ApiResult<Created<Json<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.create_event(request).await?;
    Ok(Created(Json(response)))
}

/// Get event by ID
///
/// GET /events/{event_id}
pub async fn get_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(path): Path<EventIdPath>,
) -> ApiResult<Json<EventResponse>> {
    let event_id = path.event_id()?;

    let service = EventService::new(state.service_context());
    let response = service.get_event(event_id).await?;
    Ok(Json(response))
}

/// Make an event the active one
///
/// POST /events/{event_id}/activate
pub async fn activate_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(path): Path<EventIdPath>,
) -> ApiResult<Json<EventResponse>> {
    let event_id = path.event_id()?;

    let service = EventService::new(state.service_context());
    let response = service.activate(event_id).await?;
    Ok(Json(response))
}

/// List the confirmations of an event
///
/// GET /events/{event_id}/confirmations
pub async fn list_confirmations(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(path): Path<EventIdPath>,
) -> ApiResult<Json<Vec<AttendanceEntryResponse>>> {
    let event_id = path.event_id()?;

    let service = EventService::new(state.service_context());
    let response = service.list_attendance(event_id).await?;
    Ok(Json(response))
}
