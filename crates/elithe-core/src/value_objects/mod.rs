//! Value objects - immutable types that represent domain concepts

mod credential;
mod snowflake;

pub use credential::{generate_checkin_token, CredentialEnvelope, ScannedCredential};
pub use snowflake::{as_number, Snowflake, SnowflakeGenerator, SnowflakeParseError};
