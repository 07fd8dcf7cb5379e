//! Member entity - a club member's profile and attendance rules

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Confirmations needed to unlock one reward tier
pub const CONFIRMATIONS_PER_REWARD_TIER: i32 = 4;

/// Max distance in days between event and birthday to flag a birthday ride
pub const BIRTHDAY_WINDOW_DAYS: i64 = 3;

/// Member role, as asserted by the identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    #[default]
    Member,
    Admin,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::str::FromStr for MemberRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown member role: {other}")),
        }
    }
}

/// Member profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub motorcycle: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub participation_count: i32,
    pub reward_tiers: i32,
    pub role: MemberRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Statistics derived when a member confirms attendance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttendanceStats {
    pub participation_count: i32,
    pub reward_tiers: i32,
    pub new_bike: bool,
    pub birthday_window: bool,
}

/// How a submitted motorcycle relates to the stored one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorcycleChange {
    /// Nothing stored yet
    FirstEntry,
    Changed,
    Unchanged,
}

impl Member {
    /// Create a new member profile with zeroed counters
    pub fn new(id: Uuid, name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            motorcycle: None,
            birth_date: None,
            participation_count: 0,
            reward_tiers: 0,
            role: MemberRole::Member,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_motorcycle(mut self, motorcycle: impl Into<String>) -> Self {
        self.motorcycle = Some(motorcycle.into());
        self
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn with_role(mut self, role: MemberRole) -> Self {
        self.role = role;
        self
    }

    /// Apply one attendance confirmation to this profile.
    ///
    /// Updates the stored motorcycle when it changed (or was never set),
    /// increments the participation counter and recomputes reward tiers.
    /// Returns the statistics recorded on the confirmation.
    pub fn record_attendance(&mut self, motorcycle: &str, event_date: NaiveDate) -> AttendanceStats {
        let submitted = motorcycle.trim();
        let change = compare_motorcycle(self.motorcycle.as_deref(), submitted);

        if change != MotorcycleChange::Unchanged {
            self.motorcycle = Some(submitted.to_string());
        }

        self.participation_count += 1;
        self.reward_tiers = reward_tiers_for(self.participation_count);
        self.updated_at = Utc::now();

        AttendanceStats {
            participation_count: self.participation_count,
            reward_tiers: self.reward_tiers,
            new_bike: change == MotorcycleChange::Changed,
            birthday_window: self
                .birth_date
                .is_some_and(|birth| is_birthday_window(birth, event_date)),
        }
    }
}

/// Reward tiers unlocked by a participation count
#[inline]
pub fn reward_tiers_for(participation_count: i32) -> i32 {
    participation_count.max(0) / CONFIRMATIONS_PER_REWARD_TIER
}

/// Compare motorcycles ignoring case and surrounding whitespace
pub fn compare_motorcycle(stored: Option<&str>, submitted: &str) -> MotorcycleChange {
    match stored.map(str::trim).filter(|s| !s.is_empty()) {
        None => MotorcycleChange::FirstEntry,
        Some(stored) if stored.to_lowercase() == submitted.trim().to_lowercase() => {
            MotorcycleChange::Unchanged
        }
        Some(_) => MotorcycleChange::Changed,
    }
}

/// Whether the event falls within [`BIRTHDAY_WINDOW_DAYS`] of the member's birthday.
///
/// The distance wraps around the year boundary: a Dec 30 birthday is 3 days
/// from a Jan 2 event. Feb 29 birthdays count as Feb 28 in common years.
pub fn is_birthday_window(birth_date: NaiveDate, event_date: NaiveDate) -> bool {
    let year = event_date.year();

    [year - 1, year, year + 1]
        .into_iter()
        .filter_map(|y| birthday_in_year(birth_date, y))
        .map(|birthday| (event_date - birthday).num_days().abs())
        .min()
        .is_some_and(|days| days <= BIRTHDAY_WINDOW_DAYS)
}

fn birthday_in_year(birth_date: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
}
