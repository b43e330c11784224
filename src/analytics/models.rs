//! Summary payload types
//!
//! Field names follow the dashboard's wire contract exactly; note the
//! `topOS` casing, which serde's camelCase rename would mangle to `topOs`.

use serde::{Deserialize, Serialize};

/// Shown while we have traffic; the event table has no session identity, so
/// a real bounce rate cannot be derived from it and the dashboard has always
/// rendered this fixed figure.
pub const BOUNCE_RATE_PLACEHOLDER: &str = "24.8%";
/// Shown for an empty window.
pub const BOUNCE_RATE_ZERO: &str = "0%";

/// One ranked entry in a top-pages/referrers/OS/devices list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopEntry {
    pub name: String,
    pub value: u64,
}

/// One ranked country; the dashboard table uses different field names than
/// the other dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    pub country: String,
    pub visits: u64,
}

/// One point of the trend series, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Bucket label: "14:00", "05 Mar" or "Mar" depending on the range.
    pub name: String,
    pub visitors: u64,
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTotals {
    /// Distinct visitor fingerprints in the window (an estimate).
    pub visitors: u64,
    #[serde(rename = "pageViews")]
    pub page_views: u64,
    #[serde(rename = "bounceRate")]
    pub bounce_rate: String,
}

/// The full `GET /analytics/summary` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub summary: SummaryTotals,
    pub trend: Vec<TrendPoint>,
    #[serde(rename = "topPages")]
    pub top_pages: Vec<TopEntry>,
    #[serde(rename = "topReferrers")]
    pub top_referrers: Vec<TopEntry>,
    #[serde(rename = "topCountries")]
    pub top_countries: Vec<CountryEntry>,
    #[serde(rename = "topOS")]
    pub top_os: Vec<TopEntry>,
    #[serde(rename = "topDevices")]
    pub top_devices: Vec<TopEntry>,
}
