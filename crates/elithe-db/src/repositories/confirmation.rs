//! PostgreSQL implementation of ConfirmationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use elithe_core::entities::{
    AttendanceEntry, Confirmation, Member, NewConfirmation, RecordedAttendance,
};
use elithe_core::error::DomainError;
use elithe_core::traits::{ConfirmationRepository, RepoResult};
use elithe_core::value_objects::Snowflake;

use crate::mappers::ConfirmationInsert;
use crate::models::{AttendanceRowModel, ConfirmationModel, ProfileModel};

use super::error::{map_db_error, map_unique_violation, member_not_found};

/// PostgreSQL implementation of ConfirmationRepository
#[derive(Clone)]
pub struct PgConfirmationRepository {
    pool: PgPool,
}

impl PgConfirmationRepository {
    /// Create a new PgConfirmationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfirmationRepository for PgConfirmationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Confirmation>> {
        let result = sqlx::query_as::<_, ConfirmationModel>(
            r"
            SELECT id, event_id, member_id, motorcycle, meeting_point, new_bike, birthday_window,
                   reward_tier_snapshot, token, checked_in_at, created_at
            FROM confirmations
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Confirmation::from))
    }

    #[instrument(skip(self))]
    async fn find_by_event_and_member(
        &self,
        event_id: Snowflake,
        member_id: Uuid,
    ) -> RepoResult<Option<Confirmation>> {
        let result = sqlx::query_as::<_, ConfirmationModel>(
            r"
            SELECT id, event_id, member_id, motorcycle, meeting_point, new_bike, birthday_window,
                   reward_tier_snapshot, token, checked_in_at, created_at
            FROM confirmations
            WHERE event_id = $1 AND member_id = $2
            ",
        )
        .bind(event_id.into_inner())
        .bind(member_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Confirmation::from))
    }

    #[instrument(skip(self, token))]
    async fn find_by_token(&self, token: Uuid) -> RepoResult<Option<Confirmation>> {
        let result = sqlx::query_as::<_, ConfirmationModel>(
            r"
            SELECT id, event_id, member_id, motorcycle, meeting_point, new_bike, birthday_window,
                   reward_tier_snapshot, token, checked_in_at, created_at
            FROM confirmations
            WHERE token = $1
            ",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Confirmation::from))
    }

    #[instrument(skip(self))]
    async fn list_attendance(&self, event_id: Snowflake) -> RepoResult<Vec<AttendanceEntry>> {
        let results = sqlx::query_as::<_, AttendanceRowModel>(
            r"
            SELECT c.id, c.event_id, c.member_id, c.motorcycle, c.meeting_point, c.new_bike,
                   c.birthday_window, c.reward_tier_snapshot, c.token, c.checked_in_at,
                   c.created_at, p.name AS member_name, p.email AS member_email
            FROM confirmations c
            JOIN profiles p ON p.id = c.member_id
            WHERE c.event_id = $1
            ORDER BY c.created_at ASC, c.id ASC
            ",
        )
        .bind(event_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(AttendanceEntry::from).collect())
    }

    #[instrument(skip(self, draft), fields(event_id = %draft.event_id, member_id = %draft.member_id))]
    async fn record_attendance(&self, draft: &NewConfirmation) -> RepoResult<RecordedAttendance> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Row lock serializes concurrent confirmations by the same member
        let profile = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT id, name, email, motorcycle, birth_date, participation_count, reward_tiers,
                   role, created_at, updated_at
            FROM profiles
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(draft.member_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| member_not_found(draft.member_id))?;

        let already_confirmed = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (SELECT 1 FROM confirmations WHERE event_id = $1 AND member_id = $2)
            ",
        )
        .bind(draft.event_id.into_inner())
        .bind(draft.member_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if already_confirmed {
            return Err(DomainError::AlreadyConfirmed);
        }

        let mut member = Member::from(profile);
        let stats = member.record_attendance(&draft.motorcycle, draft.event_date);

        sqlx::query(
            r"
            UPDATE profiles
            SET motorcycle = $2, participation_count = $3, reward_tiers = $4, updated_at = $5
            WHERE id = $1
            ",
        )
        .bind(member.id)
        .bind(&member.motorcycle)
        .bind(member.participation_count)
        .bind(member.reward_tiers)
        .bind(member.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let confirmation = draft.clone().into_confirmation(&stats, Utc::now());
        let insert = ConfirmationInsert::new(&confirmation);

        let inserted = sqlx::query_as::<_, ConfirmationModel>(
            r"
            INSERT INTO confirmations (id, event_id, member_id, motorcycle, meeting_point, new_bike,
                                       birthday_window, reward_tier_snapshot, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, event_id, member_id, motorcycle, meeting_point, new_bike, birthday_window,
                      reward_tier_snapshot, token, checked_in_at, created_at
            ",
        )
        .bind(insert.id)
        .bind(insert.event_id)
        .bind(insert.member_id)
        .bind(insert.motorcycle)
        .bind(insert.meeting_point)
        .bind(insert.new_bike)
        .bind(insert.birthday_window)
        .bind(insert.reward_tier_snapshot)
        .bind(confirmation.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyConfirmed))?;

        tx.commit().await.map_err(map_db_error)?;
        debug!(confirmation_id = inserted.id, "Confirmation recorded");

        Ok(RecordedAttendance {
            confirmation: Confirmation::from(inserted),
            stats,
        })
    }

    #[instrument(skip(self, token))]
    async fn attach_token(&self, id: Snowflake, token: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE confirmations
            SET token = $2
            WHERE id = $1 AND token IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self, token))]
    async fn check_in_by_token(
        &self,
        token: Uuid,
        at: DateTime<Utc>,
    ) -> RepoResult<Option<Confirmation>> {
        let result = sqlx::query_as::<_, ConfirmationModel>(
            r"
            UPDATE confirmations
            SET checked_in_at = $2
            WHERE token = $1 AND checked_in_at IS NULL
            RETURNING id, event_id, member_id, motorcycle, meeting_point, new_bike, birthday_window,
                      reward_tier_snapshot, token, checked_in_at, created_at
            ",
        )
        .bind(token)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Confirmation::from))
    }

    #[instrument(skip(self))]
    async fn check_in_by_id(
        &self,
        id: Snowflake,
        at: DateTime<Utc>,
    ) -> RepoResult<Option<Confirmation>> {
        let result = sqlx::query_as::<_, ConfirmationModel>(
            r"
            UPDATE confirmations
            SET checked_in_at = $2
            WHERE id = $1 AND checked_in_at IS NULL
            RETURNING id, event_id, member_id, motorcycle, meeting_point, new_bike, birthday_window,
                      reward_tier_snapshot, token, checked_in_at, created_at
            ",
        )
        .bind(id.into_inner())
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Confirmation::from))
    }
}
