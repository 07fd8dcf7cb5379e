//! # elithe-service
//!
//! Application layer containing the attendance, check-in, event and member
//! use cases, plus the request/response DTOs.

pub mod dto;
pub mod services;

pub use dto::{HealthResponse, ReadinessResponse};
pub use services::{
    AttendanceService, CheckinService, ConfirmationOutcome, EventService, MemberService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
