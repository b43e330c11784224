//! Windowed event retrieval
//!
//! The event store caps any single query at a page worth of rows, so the
//! window is scanned at increasing offsets until a short page signals the
//! end. The exact count is taken up front and stays authoritative for the
//! page-view total even if the scan sees a different number of rows.

use crate::models::PageEvent;
use crate::storage::{EventStore, StoreResult};
use tracing::{debug, warn};

pub struct FetchOutcome {
    pub events: Vec<PageEvent>,
    /// Result of the count query, not the number of fetched rows.
    pub page_views: u64,
    pub pages_fetched: u32,
}

/// Retrieve every event at or after `cutoff`. Any count or page failure
/// aborts the whole fetch; a partial window must never reach the aggregator.
pub async fn fetch_window(
    store: &dyn EventStore,
    cutoff: i64,
    page_size: u64,
) -> StoreResult<FetchOutcome> {
    // A zero page size would never terminate the loop.
    let page_size = page_size.max(1);

    let page_views = store.count_matching(cutoff).await?;

    let mut events: Vec<PageEvent> = Vec::with_capacity(page_views as usize);
    let mut offset = 0u64;
    let mut pages_fetched = 0u32;

    loop {
        let page = store.fetch_page(cutoff, offset, page_size).await?;
        pages_fetched += 1;
        let fetched = page.len() as u64;
        events.extend(page);

        debug!(offset, fetched, "fetched event page");

        if fetched < page_size {
            break;
        }
        offset += page_size;
    }

    if events.len() as u64 != page_views {
        // Rows landing between the count and the scan; summaries are
        // near-real-time, not point-in-time consistent.
        warn!(
            rows = events.len(),
            count = page_views,
            "event window drifted between count and scan"
        );
    }

    Ok(FetchOutcome {
        events,
        page_views,
        pages_fetched,
    })
}
