//! Check-in credential envelopes
//!
//! The JSON payload encoded into a QR code. Two shapes exist, discriminated by
//! the `type` field:
//!
//! ```text
//! { "type": "elithe_checkin", "confirmationId": <id>, "token": "<uuid>", "timestamp": <epoch millis> }
//! { "type": "elithe_member", "userId": "<uuid>", "timestamp": <epoch millis> }
//! ```
//!
//! Scanners hand us whatever text they read, so decoding never fails: anything
//! that is not one of the two shapes becomes [`ScannedCredential::Unrecognized`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::snowflake::{self, Snowflake};

/// Envelope written into a QR code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CredentialEnvelope {
    /// Single-use credential bound to one confirmation
    #[serde(rename = "elithe_checkin", rename_all = "camelCase")]
    Checkin {
        #[serde(with = "snowflake::as_number")]
        confirmation_id: Snowflake,
        token: Uuid,
        timestamp: i64,
    },

    /// Member badge bound to the member's identity
    #[serde(rename = "elithe_member", rename_all = "camelCase")]
    Member { user_id: Uuid, timestamp: i64 },
}

impl CredentialEnvelope {
    /// Build a confirmation-bound envelope
    pub fn checkin(confirmation_id: Snowflake, token: Uuid, issued_at: DateTime<Utc>) -> Self {
        Self::Checkin {
            confirmation_id,
            token,
            timestamp: issued_at.timestamp_millis(),
        }
    }

    /// Build a member badge envelope
    pub fn member(user_id: Uuid, issued_at: DateTime<Utc>) -> Self {
        Self::Member {
            user_id,
            timestamp: issued_at.timestamp_millis(),
        }
    }

    /// Serialize to the exact text placed in the QR code
    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Result of decoding scanned text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannedCredential {
    Envelope(CredentialEnvelope),
    Unrecognized,
}

impl ScannedCredential {
    /// Decode arbitrary scanned text
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str::<CredentialEnvelope>(raw.trim()) {
            Ok(envelope) => Self::Envelope(envelope),
            Err(_) => Self::Unrecognized,
        }
    }
}

/// Generate a fresh check-in token (random v4 UUID, OS entropy)
pub fn generate_checkin_token() -> Uuid {
    Uuid::new_v4()
}
