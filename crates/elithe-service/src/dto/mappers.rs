//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use elithe_common::png_data_url;
use elithe_core::entities::{AttendanceEntry, AttendanceStats, Confirmation, Event, Member};

use super::responses::{
    AttendanceEntryResponse, AttendanceStatsResponse, CheckInSummary, ConfirmResponse,
    ConfirmationResponse, EventResponse, MemberResponse,
};
use crate::services::ConfirmationOutcome;

// ============================================================================
// Confirmation Mappers
// ============================================================================

impl From<&Confirmation> for ConfirmationResponse {
    fn from(confirmation: &Confirmation) -> Self {
        Self {
            id: confirmation.id.to_string(),
            event_id: confirmation.event_id.to_string(),
            member_id: confirmation.member_id.to_string(),
            motorcycle: confirmation.motorcycle.clone(),
            meeting_point: confirmation.meeting_point.clone(),
            new_bike: confirmation.new_bike,
            birthday_window: confirmation.birthday_window,
            reward_tier_snapshot: confirmation.reward_tier_snapshot,
            has_credential: confirmation.has_credential(),
            checked_in: confirmation.is_checked_in(),
            checked_in_at: confirmation.checked_in_at,
            created_at: confirmation.created_at,
        }
    }
}

impl From<Confirmation> for ConfirmationResponse {
    fn from(confirmation: Confirmation) -> Self {
        Self::from(&confirmation)
    }
}

impl From<&AttendanceStats> for AttendanceStatsResponse {
    fn from(stats: &AttendanceStats) -> Self {
        Self {
            participation_count: stats.participation_count,
            reward_tier_count: stats.reward_tiers,
            new_bike: stats.new_bike,
            birthday_window: stats.birthday_window,
        }
    }
}

impl From<&ConfirmationOutcome> for ConfirmResponse {
    fn from(outcome: &ConfirmationOutcome) -> Self {
        Self {
            confirmation: ConfirmationResponse::from(&outcome.confirmation),
            qr_code: outcome
                .credential
                .as_ref()
                .map(|credential| png_data_url(&credential.image_png)),
            token: outcome
                .credential
                .as_ref()
                .map(|credential| credential.token.to_string()),
            stats: AttendanceStatsResponse::from(&outcome.stats),
        }
    }
}

impl From<ConfirmationOutcome> for ConfirmResponse {
    fn from(outcome: ConfirmationOutcome) -> Self {
        Self::from(&outcome)
    }
}

impl From<&AttendanceEntry> for AttendanceEntryResponse {
    fn from(entry: &AttendanceEntry) -> Self {
        let confirmation = &entry.confirmation;
        Self {
            id: confirmation.id.to_string(),
            member_id: confirmation.member_id.to_string(),
            member_name: entry.member_name.clone(),
            member_email: entry.member_email.clone(),
            motorcycle: confirmation.motorcycle.clone(),
            meeting_point: confirmation.meeting_point.clone(),
            new_bike: confirmation.new_bike,
            birthday_window: confirmation.birthday_window,
            has_credential: confirmation.has_credential(),
            checked_in: confirmation.is_checked_in(),
            checked_in_at: confirmation.checked_in_at,
            created_at: confirmation.created_at,
        }
    }
}

// ============================================================================
// Check-in Mappers
// ============================================================================

/// Confirmation with the member and event it belongs to
#[derive(Debug, Clone, Copy)]
pub struct CheckInDetails<'a> {
    pub confirmation: &'a Confirmation,
    pub member: &'a Member,
    pub event: &'a Event,
}

impl From<CheckInDetails<'_>> for CheckInSummary {
    fn from(details: CheckInDetails<'_>) -> Self {
        let CheckInDetails {
            confirmation,
            member,
            event,
        } = details;

        Self {
            confirmation_id: confirmation.id.to_string(),
            member_id: member.id.to_string(),
            member_name: member.name.clone(),
            member_email: member.email.clone(),
            event_id: event.id.to_string(),
            event_name: event.name.clone(),
            event_date: event.date,
            event_destination: event.destination.clone(),
            meeting_point: confirmation.meeting_point.clone(),
            motorcycle: confirmation.motorcycle.clone(),
            checked_in: confirmation.is_checked_in(),
            checked_in_at: confirmation.checked_in_at,
        }
    }
}

// ============================================================================
// Event Mappers
// ============================================================================

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            name: event.name.clone(),
            destination: event.destination.clone(),
            date: event.date,
            is_active: event.is_active,
            created_at: event.created_at,
        }
    }
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self::from(&event)
    }
}

// ============================================================================
// Member Mappers
// ============================================================================

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            name: member.name.clone(),
            email: member.email.clone(),
            motorcycle: member.motorcycle.clone(),
            birth_date: member.birth_date,
            participation_count: member.participation_count,
            reward_tier_count: member.reward_tiers,
            role: member.role.as_str().to_string(),
        }
    }
}
