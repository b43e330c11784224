use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One recorded page view from the tracking table.
///
/// Every field except the timestamp is optional: the tracker writes whatever
/// the request carried, and older rows predate some columns entirely. The
/// aggregation layer owns the defaulting rules, not the row type.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PageEvent {
    /// Unix seconds at which the page view occurred.
    pub occurred_at: i64,
    pub path: Option<String>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    /// Two-letter country code, when the edge resolved one.
    pub country: Option<String>,
}

impl PageEvent {
    pub fn new(occurred_at: i64) -> Self {
        Self {
            occurred_at,
            path: None,
            referrer: None,
            user_agent: None,
            country: None,
        }
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    pub fn with_referrer(mut self, referrer: &str) -> Self {
        self.referrer = Some(referrer.to_string());
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    pub fn with_country(mut self, country: &str) -> Self {
        self.country = Some(country.to_string());
        self
    }
}
