//! JWT identity verification
//!
//! Bearer tokens are minted by the club's identity provider with a shared
//! HS256 secret. This module decodes and validates them with the
//! `jsonwebtoken` crate; minting exists for tests and tooling.

use chrono::{Duration, Utc};
use elithe_core::{Identity, IdentityVerifier, MemberRole, VerificationError};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (member profile ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Member role; absent means a regular member
    #[serde(default)]
    pub role: MemberRole,
}

impl Claims {
    /// Get the member ID from the subject
    ///
    /// # Errors
    /// Returns an error if the subject is not a UUID
    pub fn member_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and token lifetime (seconds)
    #[must_use]
    pub fn new(secret: &str, token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry,
        }
    }

    /// Mint a token for a member
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_token(&self, member_id: Uuid, role: MemberRole) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: member_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_expiry)).timestamp(),
            role,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate a JWT token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_claims(token).map_err(AppError::from)
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, VerificationError> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => VerificationError::Expired,
                _ => VerificationError::Invalid(e.to_string()),
            })
    }
}

impl IdentityVerifier for JwtService {
    fn verify(&self, token: &str) -> Result<Identity, VerificationError> {
        let claims = self.decode_claims(token)?;
        let member_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| VerificationError::Invalid("subject is not a member id".to_string()))?;

        Ok(Identity {
            member_id,
            role: claims.role,
        })
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("token_expiry", &self.token_expiry)
            .finish_non_exhaustive()
    }
}
