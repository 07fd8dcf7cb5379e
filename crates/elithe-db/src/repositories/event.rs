//! PostgreSQL implementation of EventRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use elithe_core::entities::Event;
use elithe_core::traits::{EventRepository, RepoResult};
use elithe_core::value_objects::Snowflake;

use crate::models::EventModel;

use super::error::map_db_error;

/// PostgreSQL implementation of EventRepository
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    /// Create a new PgEventRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Event>> {
        let result = sqlx::query_as::<_, EventModel>(
            r"
            SELECT id, name, destination, date, is_active, created_at, updated_at
            FROM events
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Event::from))
    }

    #[instrument(skip(self))]
    async fn find_active(&self) -> RepoResult<Option<Event>> {
        let result = sqlx::query_as::<_, EventModel>(
            r"
            SELECT id, name, destination, date, is_active, created_at, updated_at
            FROM events
            WHERE is_active
            LIMIT 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Event::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Event>> {
        let results = sqlx::query_as::<_, EventModel>(
            r"
            SELECT id, name, destination, date, is_active, created_at, updated_at
            FROM events
            ORDER BY date DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Event::from).collect())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn create(&self, event: &Event) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO events (id, name, destination, date, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, FALSE, $5, $6)
            ",
        )
        .bind(event.id.into_inner())
        .bind(&event.name)
        .bind(&event.destination)
        .bind(event.date)
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn activate(&self, id: Snowflake) -> RepoResult<Option<Event>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Serializes concurrent activations; plain reads are not blocked
        sqlx::query("LOCK TABLE events IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        // Deactivate first so the partial unique index never sees two active rows
        sqlx::query(
            r"
            UPDATE events
            SET is_active = FALSE, updated_at = NOW()
            WHERE is_active AND id <> $1
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let activated = sqlx::query_as::<_, EventModel>(
            r"
            UPDATE events
            SET is_active = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, destination, date, is_active, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some(activated) = activated else {
            // Unknown event: leave the current active event untouched
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(None);
        };

        tx.commit().await.map_err(map_db_error)?;
        info!(event_id = %id, "Event activated");

        Ok(Some(Event::from(activated)))
    }
}
