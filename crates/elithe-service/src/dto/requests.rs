//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Blank-but-present strings are rejected by the services, which trim first.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Attendance Requests
// ============================================================================

/// Attendance confirmation request
///
/// Field names follow the club app's form (`moto_dia`, `pe_escolhido`).
/// Missing fields deserialize as empty strings and are reported as blank.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ConfirmAttendanceRequest {
    /// Motorcycle ridden on this event
    #[serde(default, rename = "moto_dia", alias = "motorcycle")]
    #[validate(length(max = 120, message = "Motorcycle must be at most 120 characters"))]
    pub motorcycle: String,

    /// Chosen meeting point
    #[serde(default, rename = "pe_escolhido", alias = "meetingPoint")]
    #[validate(length(max = 120, message = "Meeting point must be at most 120 characters"))]
    pub meeting_point: String,
}

// ============================================================================
// Check-in Requests
// ============================================================================

/// Check-in validate/register request
///
/// Either the scanned QR text (`qrData`) or a raw token may be given.
/// `eventId` is required when the scanned code is a member badge.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRequest {
    #[validate(length(max = 2048, message = "QR data is too long"))]
    pub qr_data: Option<String>,

    #[validate(length(max = 64, message = "Token is too long"))]
    pub token: Option<String>,

    pub event_id: Option<String>,
}

// ============================================================================
// Event Requests
// ============================================================================

/// Create event request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 120, message = "Event name must be 1-120 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 120, message = "Destination must be 1-120 characters"))]
    pub destination: String,

    /// Ride date (YYYY-MM-DD)
    pub date: NaiveDate,

    /// Make the new event the active one right away
    #[serde(default)]
    pub activate: bool,
}
