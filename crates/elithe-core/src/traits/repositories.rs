//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{
    AttendanceEntry, Confirmation, Event, Member, NewConfirmation, RecordedAttendance,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member profile by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Member>>;

    /// Create a member profile
    async fn create(&self, member: &Member) -> RepoResult<()>;
}

// ============================================================================
// Event Repository
// ============================================================================

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Find event by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Event>>;

    /// Find the currently active event, if any
    async fn find_active(&self) -> RepoResult<Option<Event>>;

    /// List all events, newest date first
    async fn list(&self) -> RepoResult<Vec<Event>>;

    /// Create a new event
    async fn create(&self, event: &Event) -> RepoResult<()>;

    /// Make the given event the only active one.
    ///
    /// Deactivating the others and activating the target happen atomically.
    /// Returns the activated event, or `None` if it does not exist.
    async fn activate(&self, id: Snowflake) -> RepoResult<Option<Event>>;
}

// ============================================================================
// Confirmation Repository
// ============================================================================

#[async_trait]
pub trait ConfirmationRepository: Send + Sync {
    /// Find confirmation by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Confirmation>>;

    /// Find a member's confirmation for an event
    async fn find_by_event_and_member(
        &self,
        event_id: Snowflake,
        member_id: Uuid,
    ) -> RepoResult<Option<Confirmation>>;

    /// Find confirmation by check-in token
    async fn find_by_token(&self, token: Uuid) -> RepoResult<Option<Confirmation>>;

    /// List confirmations for an event with member names, oldest first
    async fn list_attendance(&self, event_id: Snowflake) -> RepoResult<Vec<AttendanceEntry>>;

    /// Record a confirmation and update the member's profile in one unit.
    ///
    /// The member row is locked for the duration, the attendance rules are
    /// applied to it, and the confirmation is inserted with the resulting
    /// stats. Returns `AlreadyConfirmed` if (event, member) already exists and
    /// `MemberNotFound` if the profile is missing; nothing is written then.
    async fn record_attendance(&self, draft: &NewConfirmation) -> RepoResult<RecordedAttendance>;

    /// Attach a check-in token, only if the confirmation has none yet.
    ///
    /// Returns `true` if this call attached the token.
    async fn attach_token(&self, id: Snowflake, token: Uuid) -> RepoResult<bool>;

    /// Mark the confirmation holding `token` as checked in, only if it is not
    /// already. Returns the updated confirmation, or `None` if no row changed.
    async fn check_in_by_token(
        &self,
        token: Uuid,
        at: DateTime<Utc>,
    ) -> RepoResult<Option<Confirmation>>;

    /// Same as [`check_in_by_token`](Self::check_in_by_token), keyed by ID
    async fn check_in_by_id(
        &self,
        id: Snowflake,
        at: DateTime<Utc>,
    ) -> RepoResult<Option<Confirmation>>;
}

// ============================================================================
// Health
// ============================================================================

#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Round-trip to the backing store
    async fn ping(&self) -> RepoResult<()>;
}
