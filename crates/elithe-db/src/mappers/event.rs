//! Event entity <-> model mapper

use elithe_core::entities::Event;
use elithe_core::value_objects::Snowflake;

use crate::models::EventModel;

/// Convert EventModel to Event entity
impl From<EventModel> for Event {
    fn from(model: EventModel) -> Self {
        Event {
            id: Snowflake::new(model.id),
            name: model.name,
            destination: model.destination,
            date: model.date,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
