//! Lookback range resolution and trend bucket labels
//!
//! A range token selects how far back the summary looks and, with it, the
//! granularity of the trend series: hour buckets for a day, month buckets
//! for half a year or more, day buckets in between.

use chrono::{DateTime, Utc};

const HOUR_SECS: i64 = 3600;
const DAY_SECS: i64 = 86_400;

/// Caller-supplied lookback window selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeToken {
    H24,
    D7,
    D30,
    M6,
    Y1,
}

impl RangeToken {
    /// Resolve a raw query value. Absent or unrecognized tokens fall back to
    /// seven days; the dashboard treats that as the default view, so an
    /// unknown token is not an error.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("24h") => RangeToken::H24,
            Some("7d") => RangeToken::D7,
            Some("30d") => RangeToken::D30,
            Some("6m") => RangeToken::M6,
            Some("1y") => RangeToken::Y1,
            _ => RangeToken::D7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RangeToken::H24 => "24h",
            RangeToken::D7 => "7d",
            RangeToken::D30 => "30d",
            RangeToken::M6 => "6m",
            RangeToken::Y1 => "1y",
        }
    }

    fn duration_secs(self) -> i64 {
        match self {
            RangeToken::H24 => 24 * HOUR_SECS,
            RangeToken::D7 => 7 * DAY_SECS,
            RangeToken::D30 => 30 * DAY_SECS,
            RangeToken::M6 => 180 * DAY_SECS,
            RangeToken::Y1 => 365 * DAY_SECS,
        }
    }

    /// Inclusive lower bound of the window, as unix seconds.
    pub fn cutoff(self, now: DateTime<Utc>) -> i64 {
        now.timestamp() - self.duration_secs()
    }

    /// Trend bucket label for an event timestamp, at this range's
    /// granularity: "14:00" for a day, "Mar" for six months or a year,
    /// "05 Mar" otherwise.
    pub fn bucket_label(self, occurred_at: i64) -> String {
        let when = DateTime::<Utc>::from_timestamp(occurred_at, 0).unwrap_or_default();
        let format = match self {
            RangeToken::H24 => "%H:00",
            RangeToken::M6 | RangeToken::Y1 => "%b",
            RangeToken::D7 | RangeToken::D30 => "%d %b",
        };
        when.format(format).to_string()
    }
}
