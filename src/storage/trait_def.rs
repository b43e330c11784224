use crate::models::PageEvent;
use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event store query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read-side contract of the page-event table.
///
/// The table is written by the web application's tracking middleware; this
/// service only scans it. `fetch_page` must return rows in ascending
/// `(occurred_at, insertion)` order so that offset pagination walks the
/// window without gaps or duplicates between pages.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Initialize the storage (create tables/indexes if missing)
    async fn init(&self) -> Result<()>;

    /// Exact number of events at or after `cutoff` (unix seconds)
    async fn count_matching(&self, cutoff: i64) -> StoreResult<u64>;

    /// One page of events at or after `cutoff`, ascending, at the given offset
    async fn fetch_page(
        &self,
        cutoff: i64,
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<PageEvent>>;
}
