//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output with camelCase
//! field names. Snowflake IDs are serialized as strings for JavaScript
//! compatibility.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

// ============================================================================
// Attendance Responses
// ============================================================================

/// Attendance confirmation as seen by the confirming member
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationResponse {
    pub id: String,
    pub event_id: String,
    pub member_id: String,
    pub motorcycle: String,
    pub meeting_point: String,
    pub new_bike: bool,
    pub birthday_window: bool,
    pub reward_tier_snapshot: i32,
    pub has_credential: bool,
    pub checked_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Member statistics produced by a confirmation
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStatsResponse {
    pub participation_count: i32,
    pub reward_tier_count: i32,
    pub new_bike: bool,
    pub birthday_window: bool,
}

/// Result of confirming attendance
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResponse {
    pub confirmation: ConfirmationResponse,
    /// PNG data URL; null when the credential could not be issued
    pub qr_code: Option<String>,
    /// Check-in token encoded in `qr_code`; null alongside it
    pub token: Option<String>,
    pub stats: AttendanceStatsResponse,
}

/// Whether the caller confirmed a given event
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ConfirmationResponse>,
}

impl StatusResponse {
    pub fn unconfirmed() -> Self {
        Self {
            confirmed: false,
            data: None,
        }
    }

    pub fn confirmed(confirmation: ConfirmationResponse) -> Self {
        Self {
            confirmed: true,
            data: Some(confirmation),
        }
    }
}

/// Check-in credential for a confirmation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialResponse {
    pub token: String,
    pub qr_code: String,
}

// ============================================================================
// Check-in Responses
// ============================================================================

/// What staff see after scanning a credential
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInSummary {
    pub confirmation_id: String,
    pub member_id: String,
    pub member_name: String,
    pub member_email: String,
    pub event_id: String,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub event_destination: String,
    pub meeting_point: String,
    pub motorcycle: String,
    pub checked_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<DateTime<Utc>>,
}

/// Read-only validation result
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub confirmation: CheckInSummary,
}

impl ValidateResponse {
    pub fn new(confirmation: CheckInSummary) -> Self {
        Self {
            valid: true,
            confirmation,
        }
    }
}

/// Successful check-in registration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub success: bool,
    pub checked_in: CheckInSummary,
}

impl RegisterResponse {
    pub fn new(checked_in: CheckInSummary) -> Self {
        Self {
            success: true,
            checked_in,
        }
    }
}

// ============================================================================
// Event Responses
// ============================================================================

/// Event response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: String,
    pub name: String,
    pub destination: String,
    pub date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// One line of an event's attendance list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntryResponse {
    pub id: String,
    pub member_id: String,
    pub member_name: String,
    pub member_email: String,
    pub motorcycle: String,
    pub meeting_point: String,
    pub new_bike: bool,
    pub birthday_window: bool,
    pub has_credential: bool,
    pub checked_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Member Responses
// ============================================================================

/// Member profile response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub motorcycle: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub participation_count: i32,
    pub reward_tier_count: i32,
    pub role: String,
}

/// Member badge QR code
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeResponse {
    pub qr_code: String,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
