//! Domain entities - core business objects

mod confirmation;
mod event;
mod member;

pub use confirmation::{AttendanceEntry, Confirmation, NewConfirmation, RecordedAttendance};
pub use event::Event;
pub use member::{
    compare_motorcycle, is_birthday_window, reward_tiers_for, AttendanceStats, Member,
    MemberRole, MotorcycleChange, BIRTHDAY_WINDOW_DAYS, CONFIRMATIONS_PER_REWARD_TIER,
};
