//! Domain errors - error types for the domain layer

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Member not found: {0}")]
    MemberNotFound(Uuid),

    #[error("Event not found: {0}")]
    EventNotFound(Snowflake),

    #[error("No active event")]
    NoActiveEvent,

    #[error("Confirmation not found")]
    ConfirmationNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Event is not accepting confirmations")]
    EventNotAvailable,

    #[error("An event must be selected to check in a member badge")]
    EventSelectionRequired,

    #[error("QR code not recognized")]
    UnrecognizedCredential,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Attendance already confirmed for this event")]
    AlreadyConfirmed,

    #[error("{member_name} already checked in at {checked_in_at}")]
    AlreadyCheckedIn {
        checked_in_at: DateTime<Utc>,
        member_name: String,
    },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::EventNotFound(_) => "UNKNOWN_EVENT",
            Self::NoActiveEvent => "NO_ACTIVE_EVENT",
            Self::ConfirmationNotFound => "UNKNOWN_CONFIRMATION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EventNotAvailable => "EVENT_NOT_AVAILABLE",
            Self::EventSelectionRequired => "EVENT_SELECTION_REQUIRED",
            Self::UnrecognizedCredential => "UNRECOGNIZED_CREDENTIAL",

            // Conflict
            Self::AlreadyConfirmed => "ALREADY_CONFIRMED",
            Self::AlreadyCheckedIn { .. } => "ALREADY_CHECKED_IN",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MemberNotFound(_)
                | Self::EventNotFound(_)
                | Self::NoActiveEvent
                | Self::ConfirmationNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EventNotAvailable
                | Self::EventSelectionRequired
                | Self::UnrecognizedCredential
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyConfirmed | Self::AlreadyCheckedIn { .. })
    }

    /// HTTP status code for this error.
    ///
    /// Conflicts are reported as 400 so clients handle them like any other
    /// rejected request.
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_validation() || self.is_conflict() {
            400
        } else {
            500
        }
    }
}

/// Failure to mint or render a credential image
#[derive(Debug, Error)]
pub enum CredentialIssuanceError {
    #[error("Failed to encode credential payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Failed to encode QR code: {0}")]
    Encode(String),

    #[error("Failed to render credential image: {0}")]
    Render(String),
}
