//! Confirmation entity - a member's attendance confirmation for one event
//!
//! Lifecycle:
//! - created by the attendance flow, with or without a check-in token
//! - `token` is attached at most once, only while it is still unset
//! - `checked_in_at` moves from unset to a timestamp exactly once

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::member::AttendanceStats;
use crate::value_objects::Snowflake;

/// Attendance confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub id: Snowflake,
    pub event_id: Snowflake,
    pub member_id: Uuid,
    pub motorcycle: String,
    pub meeting_point: String,
    pub new_bike: bool,
    pub birthday_window: bool,
    pub reward_tier_snapshot: i32,
    pub token: Option<Uuid>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Confirmation {
    #[inline]
    pub fn is_checked_in(&self) -> bool {
        self.checked_in_at.is_some()
    }

    #[inline]
    pub fn has_credential(&self) -> bool {
        self.token.is_some()
    }
}

/// Input for recording a new confirmation.
///
/// The flags and reward snapshot are derived from the member profile inside
/// the recording transaction, so they are not part of the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConfirmation {
    pub id: Snowflake,
    pub event_id: Snowflake,
    pub member_id: Uuid,
    pub motorcycle: String,
    pub meeting_point: String,
    pub event_date: NaiveDate,
}

impl NewConfirmation {
    /// Build the stored confirmation once the member's stats are known
    pub fn into_confirmation(self, stats: &AttendanceStats, created_at: DateTime<Utc>) -> Confirmation {
        Confirmation {
            id: self.id,
            event_id: self.event_id,
            member_id: self.member_id,
            motorcycle: self.motorcycle.trim().to_string(),
            meeting_point: self.meeting_point.trim().to_string(),
            new_bike: stats.new_bike,
            birthday_window: stats.birthday_window,
            reward_tier_snapshot: stats.reward_tiers,
            token: None,
            checked_in_at: None,
            created_at,
        }
    }
}

/// A freshly recorded confirmation plus the member stats it produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAttendance {
    pub confirmation: Confirmation,
    pub stats: AttendanceStats,
}

/// Confirmation joined with the confirming member, for attendance lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceEntry {
    pub confirmation: Confirmation,
    pub member_name: String,
    pub member_email: String,
}
