use crate::models::PageEvent;
use crate::storage::{EventStore, StoreResult};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

pub struct PostgresEventStore {
    pub pool: Arc<PgPool>,
}

impl PostgresEventStore {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Batch insert, used by the seeding CLI and integration tests.
    pub async fn insert_events(&self, events: &[PageEvent]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for event in events {
            sqlx::query(
                r#"
                INSERT INTO page_events (occurred_at, path, referrer, user_agent, country)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(event.occurred_at)
            .bind(&event.path)
            .bind(&event.referrer)
            .bind(&event.user_agent)
            .bind(&event.country)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl EventStore for PostgresEventStore {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS page_events (
                id BIGSERIAL PRIMARY KEY,
                occurred_at BIGINT NOT NULL,
                path TEXT,
                referrer TEXT,
                user_agent TEXT,
                country TEXT
            )
            "#,
        )
        .execute(self.pool.as_ref())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_occurred_at ON page_events(occurred_at)")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn count_matching(&self, cutoff: i64) -> StoreResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM page_events
            WHERE occurred_at >= $1
            "#,
        )
        .bind(cutoff)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count as u64)
    }

    async fn fetch_page(
        &self,
        cutoff: i64,
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<PageEvent>> {
        let events = sqlx::query_as::<_, PageEvent>(
            r#"
            SELECT occurred_at, path, referrer, user_agent, country
            FROM page_events
            WHERE occurred_at >= $1
            ORDER BY occurred_at ASC, id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(cutoff)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(events)
    }
}
