use crate::models::PageEvent;
use crate::storage::{EventStore, StoreResult};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory event store for exercising the aggregation pipeline without a
/// database. Pagination semantics match the SQL stores: ascending by
/// timestamp, insertion order on ties.
#[derive(Default)]
pub struct MemoryEventStore {
    events: Mutex<Vec<PageEvent>>,
    fetch_calls: AtomicUsize,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: PageEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn insert_events(&self, events: &[PageEvent]) {
        self.events.lock().unwrap().extend_from_slice(events);
    }

    /// Number of `fetch_page` calls made so far.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn window(&self, cutoff: i64) -> Vec<PageEvent> {
        let events = self.events.lock().unwrap();
        let mut matching: Vec<PageEvent> = events
            .iter()
            .filter(|e| e.occurred_at >= cutoff)
            .cloned()
            .collect();
        // Stable sort: ties keep insertion order, like the id tiebreak in SQL.
        matching.sort_by_key(|e| e.occurred_at);
        matching
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn init(&self) -> Result<()> {
        Ok(())
    }

    async fn count_matching(&self, cutoff: i64) -> StoreResult<u64> {
        let events = self.events.lock().unwrap();
        Ok(events.iter().filter(|e| e.occurred_at >= cutoff).count() as u64)
    }

    async fn fetch_page(
        &self,
        cutoff: i64,
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<PageEvent>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        let window = self.window(cutoff);
        let start = (offset as usize).min(window.len());
        let end = (start + limit as usize).min(window.len());
        Ok(window[start..end].to_vec())
    }
}
