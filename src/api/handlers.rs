use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

use crate::analytics::{self, RangeToken, SummaryReport};
use crate::storage::EventStore;

pub struct AppState {
    pub store: Arc<dyn EventStore>,
    pub fetch_page_size: u64,
    pub request_deadline: Duration,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

#[derive(Deserialize)]
pub struct SummaryQuery {
    pub range: Option<String>,
}

/// Serve the dashboard summary for the requested lookback range.
///
/// An unknown or missing `range` silently falls back to the 7-day view.
/// Store failures and deadline expiry fail the whole request; the dashboard
/// never receives a partial summary.
pub async fn analytics_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryReport>, (StatusCode, Json<ErrorResponse>)> {
    let range = RangeToken::parse(query.range.as_deref());

    let outcome = tokio::time::timeout(
        state.request_deadline,
        analytics::build_summary(
            state.store.as_ref(),
            range,
            Utc::now(),
            state.fetch_page_size,
        ),
    )
    .await;

    match outcome {
        Ok(Ok(report)) => Ok(Json(report)),
        Ok(Err(e)) => {
            error!("Failed to build analytics summary: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to build analytics summary: {}", e),
                }),
            ))
        }
        Err(_) => {
            error!(
                range = range.as_str(),
                deadline_secs = state.request_deadline.as_secs(),
                "Analytics summary timed out"
            );
            Err((
                StatusCode::GATEWAY_TIMEOUT,
                Json(ErrorResponse {
                    error: "Analytics summary timed out".to_string(),
                }),
            ))
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<SuccessResponse> {
    Json(SuccessResponse {
        message: "OK".to_string(),
    })
}
