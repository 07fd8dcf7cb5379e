//! Member profile database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for profiles table
#[derive(Debug, Clone, FromRow)]
pub struct ProfileModel {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub motorcycle: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub participation_count: i32,
    pub reward_tiers: i32,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
