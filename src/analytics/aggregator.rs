//! Single-pass summary aggregation
//!
//! One `SummaryAccumulator` lives for the duration of one summary request:
//! `observe` is called once per fetched event, `finalize` ranks the counters
//! and assembles the response payload. Counters are `BTreeMap`s so that tie
//! order in ranking, and with it the serialized payload, is deterministic
//! across runs over the same window.

use crate::analytics::classifier::{classify_user_agent, fingerprint};
use crate::analytics::models::{
    CountryEntry, SummaryReport, SummaryTotals, TrendPoint, BOUNCE_RATE_PLACEHOLDER,
    BOUNCE_RATE_ZERO,
};
use crate::analytics::range::RangeToken;
use crate::analytics::rank::{top_n, TOP_COUNTRY_LIMIT, TOP_DIMENSION_LIMIT};
use crate::models::PageEvent;
use std::collections::{BTreeMap, HashMap, HashSet};
use url::Url;

/// Sentinel country for events the edge could not geolocate.
pub const COUNTRY_UNKNOWN: &str = "XX";

const ROOT_PATH: &str = "/";
const DIRECT_REFERRER: &str = "Direct";

/// Reduce a raw referrer to the hostname the dashboard groups by. Absent,
/// unparseable and host-less referrers (mailto:, about:blank) all count as
/// direct traffic; one leading "www." is stripped.
pub fn normalize_referrer(referrer: Option<&str>) -> String {
    let Some(raw) = referrer else {
        return DIRECT_REFERRER.to_string();
    };

    match Url::parse(raw) {
        Ok(url) => match url.host_str() {
            Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
            None => DIRECT_REFERRER.to_string(),
        },
        Err(_) => DIRECT_REFERRER.to_string(),
    }
}

struct TrendBucket {
    /// Earliest event timestamp seen for this label; orders the series.
    start_ts: i64,
    views: u64,
    visitors: HashSet<String>,
}

pub struct SummaryAccumulator {
    range: RangeToken,
    pages: BTreeMap<String, u64>,
    referrers: BTreeMap<String, u64>,
    countries: BTreeMap<String, u64>,
    os: BTreeMap<String, u64>,
    devices: BTreeMap<String, u64>,
    visitors: HashSet<String>,
    trend: HashMap<String, TrendBucket>,
}

impl SummaryAccumulator {
    pub fn new(range: RangeToken) -> Self {
        Self {
            range,
            pages: BTreeMap::new(),
            referrers: BTreeMap::new(),
            countries: BTreeMap::new(),
            os: BTreeMap::new(),
            devices: BTreeMap::new(),
            visitors: HashSet::new(),
            trend: HashMap::new(),
        }
    }

    /// Fold one event into every dimension. Infallible: missing fields fall
    /// back to their sentinels instead of erroring.
    pub fn observe(&mut self, event: &PageEvent) {
        let path = event
            .path
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(ROOT_PATH);
        *self.pages.entry(path.to_string()).or_insert(0) += 1;

        let referrer = normalize_referrer(event.referrer.as_deref());
        *self.referrers.entry(referrer).or_insert(0) += 1;

        let country = event
            .country
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(COUNTRY_UNKNOWN);
        *self.countries.entry(country.to_string()).or_insert(0) += 1;

        let (os, device) = classify_user_agent(event.user_agent.as_deref().unwrap_or(""));
        *self.os.entry(os.as_str().to_string()).or_insert(0) += 1;
        *self.devices.entry(device.as_str().to_string()).or_insert(0) += 1;

        let visitor = fingerprint(event.user_agent.as_deref(), event.country.as_deref());
        self.visitors.insert(visitor.clone());

        let label = self.range.bucket_label(event.occurred_at);
        let bucket = self.trend.entry(label).or_insert_with(|| TrendBucket {
            start_ts: event.occurred_at,
            views: 0,
            visitors: HashSet::new(),
        });
        bucket.start_ts = bucket.start_ts.min(event.occurred_at);
        bucket.views += 1;
        bucket.visitors.insert(visitor);
    }

    /// Rank and assemble. `page_views` comes from the store's count query,
    /// not from the number of observed events; the two can drift when rows
    /// land mid-scan.
    pub fn finalize(self, page_views: u64) -> SummaryReport {
        let mut trend: Vec<(String, TrendBucket)> = self.trend.into_iter().collect();
        trend.sort_by(|a, b| (a.1.start_ts, &a.0).cmp(&(b.1.start_ts, &b.0)));
        let trend = trend
            .into_iter()
            .map(|(name, bucket)| TrendPoint {
                name,
                visitors: bucket.visitors.len() as u64,
                views: bucket.views,
            })
            .collect();

        let bounce_rate = if page_views > 0 {
            BOUNCE_RATE_PLACEHOLDER
        } else {
            BOUNCE_RATE_ZERO
        };

        let top_countries = top_n(&self.countries, TOP_COUNTRY_LIMIT)
            .into_iter()
            .map(|entry| CountryEntry {
                country: entry.name,
                visits: entry.value,
            })
            .collect();

        SummaryReport {
            summary: SummaryTotals {
                visitors: self.visitors.len() as u64,
                page_views,
                bounce_rate: bounce_rate.to_string(),
            },
            trend,
            top_pages: top_n(&self.pages, TOP_DIMENSION_LIMIT),
            top_referrers: top_n(&self.referrers, TOP_DIMENSION_LIMIT),
            top_countries,
            top_os: top_n(&self.os, TOP_DIMENSION_LIMIT),
            top_devices: top_n(&self.devices, TOP_DIMENSION_LIMIT),
        }
    }
}
