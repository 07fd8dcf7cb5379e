//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{CheckinRequest, ConfirmAttendanceRequest, CreateEventRequest};

// Re-export commonly used response types
pub use responses::{
    AttendanceEntryResponse, AttendanceStatsResponse, BadgeResponse, CheckInSummary,
    ConfirmResponse, ConfirmationResponse, CredentialResponse, EventResponse, HealthChecks,
    HealthResponse, MemberResponse, ReadinessResponse, RegisterResponse, StatusResponse,
    ValidateResponse,
};

// Re-export mapper helper structs
pub use mappers::CheckInDetails;
