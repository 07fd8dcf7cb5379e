//! # elithe-core
//!
//! Domain layer containing entities, value objects, attendance rules and the
//! repository/credential ports. This crate has zero dependencies on
//! infrastructure (database, web framework, image encoding, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AttendanceEntry, AttendanceStats, Confirmation, Event, Member, MemberRole,
    NewConfirmation, RecordedAttendance,
};
pub use error::{CredentialIssuanceError, DomainError};
pub use traits::{
    ConfirmationRepository, CredentialIssuer, EventRepository, HealthCheck, Identity,
    IdentityVerifier, IssuedCredential, MemberRepository, RepoResult, VerificationError,
};
pub use value_objects::{
    CredentialEnvelope, ScannedCredential, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
