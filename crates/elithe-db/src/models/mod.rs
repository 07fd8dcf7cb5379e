//! Database models - SQLx-compatible structs for PostgreSQL tables

mod confirmation;
mod event;
mod profile;

pub use confirmation::{AttendanceRowModel, ConfirmationModel};
pub use event::EventModel;
pub use profile::ProfileModel;
