//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in elithe-core.
//! Each repository handles database operations for a specific domain entity.

mod confirmation;
mod error;
mod event;
mod health;
mod member;

pub use confirmation::PgConfirmationRepository;
pub use event::PgEventRepository;
pub use health::PgHealthCheck;
pub use member::PgMemberRepository;
