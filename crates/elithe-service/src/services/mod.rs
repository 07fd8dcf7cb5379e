//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod attendance;
pub mod checkin;
pub mod context;
pub mod error;
pub mod event;
pub mod member;

// Re-export all services for convenience
pub use attendance::{AttendanceService, ConfirmationOutcome};
pub use checkin::{CheckinService, CredentialInput};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use event::EventService;
pub use member::MemberService;
