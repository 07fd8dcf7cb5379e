//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use elithe_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

/// Path parameters with event_id
#[derive(Debug, Deserialize)]
pub struct EventIdPath {
    pub event_id: String,
}

impl EventIdPath {
    /// Parse event_id as Snowflake
    pub fn event_id(&self) -> Result<Snowflake, ApiError> {
        self.event_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid event_id format"))
    }
}
