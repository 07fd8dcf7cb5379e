//! Event entity - a club ride members can confirm attendance for

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::Snowflake;

/// Event (ride) entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: Snowflake,
    pub name: String,
    pub destination: String,
    pub date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Create a new, inactive event
    pub fn new(id: Snowflake, name: String, destination: String, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            destination,
            date,
            is_active: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether members may currently confirm attendance
    #[inline]
    pub fn accepts_confirmations(&self) -> bool {
        self.is_active
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }
}
