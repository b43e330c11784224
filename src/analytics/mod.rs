//! Analytics aggregation pipeline
//!
//! Turns the raw page-event table into the dashboard summary payload:
//! range resolution, windowed fetch, one aggregation pass, top-N ranking.
//! Every stage is deterministic for a fixed event set and clock; running
//! the pipeline twice over the same window yields identical bytes.

pub mod aggregator;
pub mod classifier;
pub mod fetcher;
pub mod models;
pub mod range;
pub mod rank;

pub use aggregator::{normalize_referrer, SummaryAccumulator};
pub use fetcher::{fetch_window, FetchOutcome};
pub use models::SummaryReport;
pub use range::RangeToken;

use crate::storage::{EventStore, StoreResult};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Run the whole pipeline for one summary request. `now` is injected rather
/// than read here so callers (and tests) control the window edge.
pub async fn build_summary(
    store: &dyn EventStore,
    range: RangeToken,
    now: DateTime<Utc>,
    page_size: u64,
) -> StoreResult<SummaryReport> {
    let cutoff = range.cutoff(now);
    let outcome = fetch_window(store, cutoff, page_size).await?;

    debug!(
        range = range.as_str(),
        events = outcome.events.len(),
        pages = outcome.pages_fetched,
        "aggregating summary window"
    );

    let mut acc = SummaryAccumulator::new(range);
    for event in &outcome.events {
        acc.observe(event);
    }

    Ok(acc.finalize(outcome.page_views))
}
