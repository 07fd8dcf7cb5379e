//! Confirmation entity <-> model mapper

use elithe_core::entities::{AttendanceEntry, Confirmation};
use elithe_core::value_objects::Snowflake;

use crate::models::{AttendanceRowModel, ConfirmationModel};

/// Convert ConfirmationModel to Confirmation entity
impl From<ConfirmationModel> for Confirmation {
    fn from(model: ConfirmationModel) -> Self {
        Confirmation {
            id: Snowflake::new(model.id),
            event_id: Snowflake::new(model.event_id),
            member_id: model.member_id,
            motorcycle: model.motorcycle,
            meeting_point: model.meeting_point,
            new_bike: model.new_bike,
            birthday_window: model.birthday_window,
            reward_tier_snapshot: model.reward_tier_snapshot,
            token: model.token,
            checked_in_at: model.checked_in_at,
            created_at: model.created_at,
        }
    }
}

impl From<AttendanceRowModel> for AttendanceEntry {
    fn from(row: AttendanceRowModel) -> Self {
        AttendanceEntry {
            confirmation: row.confirmation.into(),
            member_name: row.member_name,
            member_email: row.member_email,
        }
    }
}

/// Confirmation entity reference prepared for insertion
pub struct ConfirmationInsert<'a> {
    pub id: i64,
    pub event_id: i64,
    pub member_id: uuid::Uuid,
    pub motorcycle: &'a str,
    pub meeting_point: &'a str,
    pub new_bike: bool,
    pub birthday_window: bool,
    pub reward_tier_snapshot: i32,
}

impl<'a> ConfirmationInsert<'a> {
    pub fn new(confirmation: &'a Confirmation) -> Self {
        Self {
            id: confirmation.id.into_inner(),
            event_id: confirmation.event_id.into_inner(),
            member_id: confirmation.member_id,
            motorcycle: &confirmation.motorcycle,
            meeting_point: &confirmation.meeting_point,
            new_bike: confirmation.new_bike,
            birthday_window: confirmation.birthday_window,
            reward_tier_snapshot: confirmation.reward_tier_snapshot,
        }
    }
}
