//! Check-in service
//!
//! Staff-facing validation and registration of scanned credentials.
//! Validation is read-only; registration is the single conditional write
//! that moves a confirmation to checked-in.

use chrono::Utc;
use elithe_core::entities::{Confirmation, Event, Member};
use elithe_core::{CredentialEnvelope, DomainError, ScannedCredential, Snowflake};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    CheckInDetails, CheckInSummary, CheckinRequest, RegisterResponse, ValidateResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// A scanned or typed credential, resolved to what it identifies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialInput {
    /// Check-in token of one confirmation
    Token(Uuid),
    /// Member badge; needs an event to find the confirmation
    Badge(Uuid),
}

impl CredentialInput {
    /// Resolve scanner output.
    ///
    /// Envelopes decode to their token or member id, a bare UUID is taken as
    /// a check-in token and anything else is unrecognized.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if let Ok(token) = Uuid::parse_str(raw) {
            return Ok(Self::Token(token));
        }

        match ScannedCredential::decode(raw) {
            ScannedCredential::Envelope(CredentialEnvelope::Checkin { token, .. }) => {
                Ok(Self::Token(token))
            }
            ScannedCredential::Envelope(CredentialEnvelope::Member { user_id, .. }) => {
                Ok(Self::Badge(user_id))
            }
            ScannedCredential::Unrecognized => Err(DomainError::UnrecognizedCredential),
        }
    }

    /// Resolve a check-in request body into the credential and selected event
    ///
    /// The event selection only matters for badges and is ignored for tokens.
    pub fn from_request(request: &CheckinRequest) -> ServiceResult<(Self, Option<Snowflake>)> {
        let raw = non_blank(request.qr_data.as_deref())
            .or_else(|| non_blank(request.token.as_deref()))
            .ok_or_else(|| DomainError::ValidationError("qrData or token is required".to_string()))?;

        let input = Self::parse(raw)?;
        let event_id = match input {
            Self::Token(_) => None,
            Self::Badge(_) => non_blank(request.event_id.as_deref())
                .map(|id| {
                    id.parse::<Snowflake>()
                        .map_err(|_| DomainError::ValidationError("Invalid eventId".to_string()))
                })
                .transpose()?,
        };

        Ok((input, event_id))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Check-in service
pub struct CheckinService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CheckinService<'a> {
    /// Create a new CheckinService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Look up the confirmation behind a credential without changing anything
    #[instrument(skip(self, request))]
    pub async fn validate(&self, request: &CheckinRequest) -> ServiceResult<ValidateResponse> {
        let (input, event_id) = CredentialInput::from_request(request)?;
        let confirmation = self.resolve(input, event_id).await?;
        let summary = self.summarize(&confirmation).await?;

        Ok(ValidateResponse::new(summary))
    }

    /// Mark the confirmation behind a credential as checked in
    ///
    /// Only the first registration succeeds; later ones fail with
    /// `AlreadyCheckedIn` carrying the original timestamp.
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: &CheckinRequest) -> ServiceResult<RegisterResponse> {
        let (input, event_id) = CredentialInput::from_request(request)?;
        let now = Utc::now();
        let repo = self.ctx.confirmation_repo();

        let (checked_in, current) = match input {
            CredentialInput::Token(token) => match repo.check_in_by_token(token, now).await? {
                Some(confirmation) => (Some(confirmation), None),
                None => (None, repo.find_by_token(token).await?),
            },
            CredentialInput::Badge(member_id) => {
                let event_id = event_id.ok_or(DomainError::EventSelectionRequired)?;
                let confirmation = repo
                    .find_by_event_and_member(event_id, member_id)
                    .await?
                    .ok_or(DomainError::ConfirmationNotFound)?;
                match repo.check_in_by_id(confirmation.id, now).await? {
                    Some(confirmation) => (Some(confirmation), None),
                    None => (None, repo.find_by_id(confirmation.id).await?),
                }
            }
        };

        if let Some(confirmation) = checked_in {
            let summary = self.summarize(&confirmation).await?;
            info!(
                confirmation_id = %confirmation.id,
                member_id = %confirmation.member_id,
                "Member checked in"
            );
            return Ok(RegisterResponse::new(summary));
        }

        let confirmation = current.ok_or(DomainError::ConfirmationNotFound)?;
        let checked_in_at = confirmation
            .checked_in_at
            .ok_or_else(|| ServiceError::internal("Check-in refused for a confirmation not yet checked in"))?;
        let member = self.member(confirmation.member_id).await?;

        warn!(
            confirmation_id = %confirmation.id,
            checked_in_at = %checked_in_at,
            "Credential already used for check-in"
        );

        Err(DomainError::AlreadyCheckedIn {
            checked_in_at,
            member_name: member.name,
        }
        .into())
    }

    async fn resolve(
        &self,
        input: CredentialInput,
        event_id: Option<Snowflake>,
    ) -> ServiceResult<Confirmation> {
        let repo = self.ctx.confirmation_repo();
        let confirmation = match input {
            CredentialInput::Token(token) => repo.find_by_token(token).await?,
            CredentialInput::Badge(member_id) => {
                let event_id = event_id.ok_or(DomainError::EventSelectionRequired)?;
                repo.find_by_event_and_member(event_id, member_id).await?
            }
        };

        Ok(confirmation.ok_or(DomainError::ConfirmationNotFound)?)
    }

    async fn summarize(&self, confirmation: &Confirmation) -> ServiceResult<CheckInSummary> {
        let member = self.member(confirmation.member_id).await?;
        let event = self.event(confirmation.event_id).await?;

        Ok(CheckInSummary::from(CheckInDetails {
            confirmation,
            member: &member,
            event: &event,
        }))
    }

    async fn member(&self, member_id: Uuid) -> ServiceResult<Member> {
        Ok(self
            .ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or(DomainError::MemberNotFound(member_id))?)
    }

    async fn event(&self, event_id: Snowflake) -> ServiceResult<Event> {
        Ok(self
            .ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or(DomainError::EventNotFound(event_id))?)
    }
}
