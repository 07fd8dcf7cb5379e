//! Member service
//!
//! The caller's own profile and member badge.

use chrono::Utc;
use elithe_common::png_data_url;
use elithe_core::entities::Member;
use elithe_core::{CredentialEnvelope, DomainError};
use tracing::instrument;
use uuid::Uuid;

use crate::dto::{BadgeResponse, MemberResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get a member profile
    #[instrument(skip(self))]
    pub async fn get_profile(&self, member_id: Uuid) -> ServiceResult<MemberResponse> {
        let member = self.find(member_id).await?;
        Ok(MemberResponse::from(&member))
    }

    /// Render the member's badge QR code
    ///
    /// Staff can scan a badge together with a selected event to find the
    /// member's confirmation when the check-in code is not at hand.
    #[instrument(skip(self))]
    pub async fn badge(&self, member_id: Uuid) -> ServiceResult<BadgeResponse> {
        let member = self.find(member_id).await?;
        let envelope = CredentialEnvelope::member(member.id, Utc::now());
        let image = self.ctx.credential_issuer().render(&envelope)?;

        Ok(BadgeResponse {
            qr_code: png_data_url(&image),
        })
    }

    async fn find(&self, member_id: Uuid) -> ServiceResult<Member> {
        Ok(self
            .ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or(DomainError::MemberNotFound(member_id))?)
    }
}
