//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod attendance;
pub mod checkin;
pub mod events;
pub mod health;
pub mod members;
