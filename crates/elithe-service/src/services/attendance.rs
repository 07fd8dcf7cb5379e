//! Attendance service
//!
//! Handles attendance confirmation for the active ride, the caller's
//! confirmation status and check-in credential retrieval.

use elithe_common::png_data_url;
use elithe_core::entities::{AttendanceStats, Confirmation, NewConfirmation, RecordedAttendance};
use elithe_core::{DomainError, IssuedCredential, Snowflake};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::dto::{ConfirmAttendanceRequest, ConfirmationResponse, CredentialResponse, StatusResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Everything produced by a successful confirmation.
///
/// `credential` is `None` when the QR code could not be issued or attached;
/// the confirmation itself is still recorded and a credential can be
/// requested again later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationOutcome {
    pub confirmation: Confirmation,
    pub credential: Option<IssuedCredential>,
    pub stats: AttendanceStats,
}

/// Attendance service
pub struct AttendanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AttendanceService<'a> {
    /// Create a new AttendanceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Confirm attendance of a member at an event
    ///
    /// Records the confirmation and updates the member profile atomically,
    /// then tries to issue a check-in credential.
    #[instrument(skip(self, request))]
    pub async fn confirm(
        &self,
        event_id: Snowflake,
        member_id: Uuid,
        request: ConfirmAttendanceRequest,
    ) -> ServiceResult<ConfirmationOutcome> {
        let motorcycle = required(&request.motorcycle, "Motorcycle is required")?;
        let meeting_point = required(&request.meeting_point, "Meeting point is required")?;

        let event = self
            .ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .filter(|event| event.accepts_confirmations())
            .ok_or(DomainError::EventNotAvailable)?;

        if self
            .ctx
            .confirmation_repo()
            .find_by_event_and_member(event_id, member_id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyConfirmed.into());
        }

        let draft = NewConfirmation {
            id: self.ctx.generate_id(),
            event_id,
            member_id,
            motorcycle: motorcycle.to_string(),
            meeting_point: meeting_point.to_string(),
            event_date: event.date,
        };

        let RecordedAttendance {
            mut confirmation,
            stats,
        } = self.ctx.confirmation_repo().record_attendance(&draft).await?;

        info!(
            confirmation_id = %confirmation.id,
            participation_count = stats.participation_count,
            reward_tiers = stats.reward_tiers,
            new_bike = stats.new_bike,
            birthday_window = stats.birthday_window,
            "Attendance confirmed"
        );

        let credential = self.attach_credential(&mut confirmation).await;

        Ok(ConfirmationOutcome {
            confirmation,
            credential,
            stats,
        })
    }

    /// Whether the member confirmed the event, with the confirmation if so
    #[instrument(skip(self))]
    pub async fn get_status(
        &self,
        event_id: Snowflake,
        member_id: Uuid,
    ) -> ServiceResult<StatusResponse> {
        let status = match self
            .ctx
            .confirmation_repo()
            .find_by_event_and_member(event_id, member_id)
            .await?
        {
            Some(confirmation) => StatusResponse::confirmed(ConfirmationResponse::from(&confirmation)),
            None => StatusResponse::unconfirmed(),
        };

        Ok(status)
    }

    /// Get the check-in credential of the member's confirmation
    ///
    /// An existing token is re-rendered as is. A confirmation without one gets
    /// a fresh token; if a concurrent request attached its own first, that
    /// token is rendered instead.
    #[instrument(skip(self))]
    pub async fn credential(
        &self,
        event_id: Snowflake,
        member_id: Uuid,
    ) -> ServiceResult<CredentialResponse> {
        let confirmation = self
            .ctx
            .confirmation_repo()
            .find_by_event_and_member(event_id, member_id)
            .await?
            .ok_or(DomainError::ConfirmationNotFound)?;

        let issuer = self.ctx.credential_issuer();
        let issued = match confirmation.token {
            Some(token) => issuer.render_token(confirmation.id, token)?,
            None => {
                let issued = issuer.issue(confirmation.id)?;
                if self
                    .ctx
                    .confirmation_repo()
                    .attach_token(confirmation.id, issued.token)
                    .await?
                {
                    info!(confirmation_id = %confirmation.id, "Check-in credential issued");
                    issued
                } else {
                    let winner = self
                        .ctx
                        .confirmation_repo()
                        .find_by_id(confirmation.id)
                        .await?
                        .and_then(|stored| stored.token)
                        .ok_or_else(|| ServiceError::internal("Token attach lost without a winner"))?;
                    issuer.render_token(confirmation.id, winner)?
                }
            }
        };

        Ok(CredentialResponse {
            token: issued.token.to_string(),
            qr_code: png_data_url(&issued.image_png),
        })
    }

    /// Issue a credential and attach its token to a fresh confirmation.
    ///
    /// Failures are logged and swallowed.
    async fn attach_credential(&self, confirmation: &mut Confirmation) -> Option<IssuedCredential> {
        let issued = match self.ctx.credential_issuer().issue(confirmation.id) {
            Ok(issued) => issued,
            Err(e) => {
                warn!(
                    confirmation_id = %confirmation.id,
                    error = %e,
                    "Failed to issue check-in credential"
                );
                return None;
            }
        };

        match self
            .ctx
            .confirmation_repo()
            .attach_token(confirmation.id, issued.token)
            .await
        {
            Ok(true) => {
                confirmation.token = Some(issued.token);
                Some(issued)
            }
            Ok(false) => {
                warn!(
                    confirmation_id = %confirmation.id,
                    "Confirmation already carries a check-in token"
                );
                None
            }
            Err(e) => {
                error!(
                    confirmation_id = %confirmation.id,
                    error = %e,
                    "Failed to store check-in token"
                );
                None
            }
        }
    }
}

/// Trimmed value, or a validation error when blank
pub(super) fn required<'v>(value: &'v str, message: &str) -> ServiceResult<&'v str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::ValidationError(message.to_string()).into());
    }
    Ok(trimmed)
}
