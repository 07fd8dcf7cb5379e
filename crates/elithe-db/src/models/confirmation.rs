//! Confirmation database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for confirmations table
#[derive(Debug, Clone, FromRow)]
pub struct ConfirmationModel {
    pub id: i64,
    pub event_id: i64,
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

/// Confirmation joined with the confirming member's profile
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRowModel {
    #[sqlx(flatten)]
    pub confirmation: ConfirmationModel,
    pub member_name: String,
    pub member_email: String,
}
