//! Top-N ranking over dimension counters

use crate::analytics::models::TopEntry;
use std::collections::BTreeMap;

/// Entries kept per dimension in the summary payload.
pub const TOP_DIMENSION_LIMIT: usize = 5;
/// The country list is wider; the dashboard renders it as a table.
pub const TOP_COUNTRY_LIMIT: usize = 10;

/// Rank a counter map by count descending and keep the first `limit`
/// entries. The sort is stable over the map's key-sorted iteration order,
/// so ties come out alphabetically and repeated runs agree byte for byte.
pub fn top_n(counters: &BTreeMap<String, u64>, limit: usize) -> Vec<TopEntry> {
    let mut entries: Vec<TopEntry> = counters
        .iter()
        .map(|(name, &value)| TopEntry {
            name: name.clone(),
            value,
        })
        .collect();

    entries.sort_by(|a, b| b.value.cmp(&a.value));
    entries.truncate(limit);
    entries
}
