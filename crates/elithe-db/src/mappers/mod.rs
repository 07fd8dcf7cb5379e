//! Entity to model mappers
//!
//! This module provides conversions between domain entities (elithe-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations

mod confirmation;
mod event;
mod profile;

pub use confirmation::ConfirmationInsert;
