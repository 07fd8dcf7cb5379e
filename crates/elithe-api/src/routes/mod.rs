//! Route definitions
//!
//! All API routes organized by domain and mounted under /api.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{attendance, checkin, events, health, members};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(event_routes())
        .merge(checkin_routes())
        .merge(member_routes())
}

/// Event and attendance routes
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/active", get(events::get_active_event))
        .route("/events/:event_id", get(events::get_event))
        .route("/events/:event_id/activate", post(events::activate_event))
        .route("/events/:event_id/confirmations", get(events::list_confirmations))
        // Attendance
        .route("/events/:event_id/attend", post(attendance::confirm_attendance))
        .route("/events/:event_id/status", get(attendance::get_status))
        .route("/events/:event_id/credential", get(attendance::get_credential))
}

/// Check-in routes
fn checkin_routes() -> Router<AppState> {
    Router::new()
        .route("/checkin/validate", post(checkin::validate))
        .route("/checkin/register", post(checkin::register))
}

/// Member routes
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/members/@me", get(members::get_current_member))
        .route("/members/@me/badge", get(members::get_badge))
}
