use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;

use crate::config::AnalyticsConfig;
use crate::storage::EventStore;

use super::handlers::{analytics_summary, health_check, AppState};

pub fn create_api_router(store: Arc<dyn EventStore>, analytics: &AnalyticsConfig) -> Router {
    let state = Arc::new(AppState {
        store,
        fetch_page_size: analytics.fetch_page_size,
        request_deadline: Duration::from_secs(analytics.request_deadline_secs),
    });

    Router::new()
        .route("/health", get(health_check))
        .route("/analytics/summary", get(analytics_summary))
        // The admin dashboard is served from another origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
