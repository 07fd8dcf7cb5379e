//! Credential and identity ports

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::MemberRole;
use crate::error::CredentialIssuanceError;
use crate::value_objects::{generate_checkin_token, CredentialEnvelope, Snowflake};

/// A freshly minted check-in credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredential {
    pub token: Uuid,
    /// PNG bytes of the QR code
    pub image_png: Vec<u8>,
    pub issued_at: DateTime<Utc>,
}

/// Renders credential envelopes into scannable images
pub trait CredentialIssuer: Send + Sync {
    /// Render an envelope into PNG bytes
    fn render(&self, envelope: &CredentialEnvelope) -> Result<Vec<u8>, CredentialIssuanceError>;

    /// Mint a new token for a confirmation and render its QR image
    fn issue(&self, confirmation_id: Snowflake) -> Result<IssuedCredential, CredentialIssuanceError> {
        let token = generate_checkin_token();
        self.render_token(confirmation_id, token)
    }

    /// Render an image for a token that already exists
    fn render_token(
        &self,
        confirmation_id: Snowflake,
        token: Uuid,
    ) -> Result<IssuedCredential, CredentialIssuanceError> {
        let issued_at = Utc::now();
        let envelope = CredentialEnvelope::checkin(confirmation_id, token, issued_at);
        let image_png = self.render(&envelope)?;

        Ok(IssuedCredential {
            token,
            image_png,
            issued_at,
        })
    }
}

/// Authenticated caller, as asserted by the identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub member_id: Uuid,
    pub role: MemberRole,
}

impl Identity {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Why a bearer token was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Verifies bearer tokens minted by the identity provider
pub trait IdentityVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Identity, VerificationError>;
}
