//! Integration tests for the analytics API
//!
//! These drive the axum router end-to-end over an in-memory SQLite event
//! store and pin the exact wire shape the admin dashboard parses.

use anyhow::anyhow;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use vantage::api::create_api_router;
use vantage::config::AnalyticsConfig;
use vantage::models::PageEvent;
use vantage::storage::{EventStore, SqliteEventStore, StoreError, StoreResult};

fn test_analytics_config() -> AnalyticsConfig {
    AnalyticsConfig {
        fetch_page_size: 1000,
        request_deadline_secs: 30,
    }
}

/// Helper to create a seeded test store
async fn create_test_store() -> Arc<SqliteEventStore> {
    let store = SqliteEventStore::new("sqlite::memory:", 5).await.unwrap();
    store.init().await.unwrap();
    Arc::new(store)
}

async fn get_json(store: Arc<dyn EventStore>, uri: &str) -> (StatusCode, Value) {
    let app = create_api_router(store, &test_analytics_config());
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let store = create_test_store().await;
    let (status, json) = get_json(store, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "OK");
}

#[tokio::test]
async fn test_summary_empty_store() {
    let store = create_test_store().await;
    let (status, json) = get_json(store, "/analytics/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["summary"]["visitors"], 0);
    assert_eq!(json["summary"]["pageViews"], 0);
    assert_eq!(json["summary"]["bounceRate"], "0%");
    assert_eq!(json["trend"].as_array().unwrap().len(), 0);
    assert_eq!(json["topPages"].as_array().unwrap().len(), 0);
    assert_eq!(json["topCountries"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_summary_wire_shape() {
    let store = create_test_store().await;
    let now = Utc::now().timestamp();
    let events = vec![
        PageEvent::new(now - 3600)
            .with_path("/products")
            .with_referrer("https://www.google.com/search?q=widgets")
            .with_user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64)")
            .with_country("MX"),
        PageEvent::new(now - 1800)
            .with_path("/products")
            .with_user_agent("AppStore/3.0 iOS/17.0 model/iPhone14,2")
            .with_country("MX"),
        PageEvent::new(now - 600)
            .with_path("/")
            .with_user_agent("Dalvik/2.1.0 (Android 13; Pixel 7)")
            .with_country("US"),
    ];
    store.insert_events(&events).await.unwrap();

    let (status, json) = get_json(store, "/analytics/summary?range=7d").await;

    assert_eq!(status, StatusCode::OK);

    // Exact field casing; the dashboard parses these literally.
    for key in [
        "summary",
        "trend",
        "topPages",
        "topReferrers",
        "topCountries",
        "topOS",
        "topDevices",
    ] {
        assert!(json.get(key).is_some(), "missing key {}", key);
    }
    assert!(json.get("topOs").is_none(), "casing must be topOS");
    assert!(json["summary"].get("pageViews").is_some());
    assert!(json["summary"].get("bounceRate").is_some());

    assert_eq!(json["summary"]["pageViews"], 3);
    assert_eq!(json["summary"]["visitors"], 3);
    assert_eq!(json["summary"]["bounceRate"], "24.8%");

    let top_pages = json["topPages"].as_array().unwrap();
    assert_eq!(top_pages[0]["name"], "/products");
    assert_eq!(top_pages[0]["value"], 2);

    let referrers = json["topReferrers"].as_array().unwrap();
    let names: Vec<&str> = referrers.iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert!(names.contains(&"google.com"), "www. should be stripped");
    assert!(names.contains(&"Direct"));

    // Country entries use their own field names.
    let countries = json["topCountries"].as_array().unwrap();
    assert_eq!(countries[0]["country"], "MX");
    assert_eq!(countries[0]["visits"], 2);
    assert_eq!(countries[1]["country"], "US");
    assert_eq!(countries[1]["visits"], 1);

    let os_entries = json["topOS"].as_array().unwrap();
    let os_names: Vec<&str> = os_entries.iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert!(os_names.contains(&"Windows"));
    assert!(os_names.contains(&"iOS"));
    assert!(os_names.contains(&"Android"));

    let devices = json["topDevices"].as_array().unwrap();
    let device_names: Vec<&str> = devices.iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert!(device_names.contains(&"Desktop"));
    assert!(device_names.contains(&"Mobile"));
}

#[tokio::test]
async fn test_unknown_range_serves_week_view() {
    let store = create_test_store().await;
    let now = Utc::now().timestamp();
    // One event inside 7 days, one outside it but inside 30 days.
    store
        .insert_events(&[
            PageEvent::new(now - 86_400).with_path("/in-week"),
            PageEvent::new(now - 10 * 86_400).with_path("/in-month"),
        ])
        .await
        .unwrap();

    let (status, bogus) = get_json(store.clone(), "/analytics/summary?range=bogus").await;
    assert_eq!(status, StatusCode::OK);

    let (_, week) = get_json(store, "/analytics/summary?range=7d").await;

    // An unrecognized token is not an error; it serves the default window.
    assert_eq!(bogus["summary"]["pageViews"], 1);
    assert_eq!(bogus, week);
}

#[tokio::test]
async fn test_range_widens_the_window() {
    let store = create_test_store().await;
    let now = Utc::now().timestamp();
    store
        .insert_events(&[
            PageEvent::new(now - 3600),
            PageEvent::new(now - 100 * 86_400),
        ])
        .await
        .unwrap();

    let (_, week) = get_json(store.clone(), "/analytics/summary?range=7d").await;
    assert_eq!(week["summary"]["pageViews"], 1);

    let (_, half_year) = get_json(store, "/analytics/summary?range=6m").await;
    assert_eq!(half_year["summary"]["pageViews"], 2);
}

struct StalledStore;

#[async_trait]
impl EventStore for StalledStore {
    async fn init(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn count_matching(&self, _cutoff: i64) -> StoreResult<u64> {
        tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        Ok(0)
    }

    async fn fetch_page(
        &self,
        _cutoff: i64,
        _offset: u64,
        _limit: u64,
    ) -> StoreResult<Vec<PageEvent>> {
        Ok(vec![])
    }
}

#[tokio::test]
async fn test_deadline_expiry_returns_504() {
    let store: Arc<dyn EventStore> = Arc::new(StalledStore);
    let app = create_api_router(
        store,
        &AnalyticsConfig {
            fetch_page_size: 1000,
            request_deadline_secs: 0,
        },
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/analytics/summary")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Analytics summary timed out");
}

struct UnavailableStore;

#[async_trait]
impl EventStore for UnavailableStore {
    async fn init(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn count_matching(&self, _cutoff: i64) -> StoreResult<u64> {
        Err(StoreError::Other(anyhow!("connection refused")))
    }

    async fn fetch_page(
        &self,
        _cutoff: i64,
        _offset: u64,
        _limit: u64,
    ) -> StoreResult<Vec<PageEvent>> {
        Err(StoreError::Other(anyhow!("connection refused")))
    }
}

#[tokio::test]
async fn test_store_failure_returns_500_with_error_body() {
    let store: Arc<dyn EventStore> = Arc::new(UnavailableStore);
    let (status, json) = get_json(store, "/analytics/summary").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = json["error"].as_str().unwrap();
    assert!(error.contains("Failed to build analytics summary"));
    // No partial summary alongside the error.
    assert!(json.get("summary").is_none());
}
