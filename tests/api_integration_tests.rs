//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use civic_cache::{
    api::create_router, cache::DEFAULT_TTL, source::StaticSource, AppState, CacheAsideRepository,
    Category, TtlCache,
};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

struct TestApp {
    router: Router,
    cache: Arc<TtlCache>,
    source: Arc<StaticSource>,
}

fn create_test_app() -> TestApp {
    let source = Arc::new(
        StaticSource::new()
            .with(
                Category::Weather,
                json!({"temperature": 28.5, "condition": "sunny", "humidity": 40}),
            )
            .with(
                Category::Events,
                json!([
                    {"id": "e1", "title": "Street food festival", "startsAt": "2024-06-01T18:00:00Z"},
                    {"id": "e2", "title": "Missing start"}
                ]),
            ),
    );
    let cache = Arc::new(TtlCache::new(DEFAULT_TTL));
    let repository = CacheAsideRepository::new(cache.clone(), source.clone());

    TestApp {
        router: create_router(AppState::new(repository)),
        cache,
        source,
    }
}

async fn send(app: &TestApp, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// == Data Endpoint Tests ==

#[tokio::test]
async fn test_data_endpoint_returns_records() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/data/weather").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["category"], "weather");
    assert_eq!(json["count"], 1);
    assert_eq!(json["items"][0]["temperature"], 28.5);
}

#[tokio::test]
async fn test_data_endpoint_skips_malformed_records() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/data/events").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["items"][0]["id"], "e1");
}

#[tokio::test]
async fn test_data_endpoint_served_from_cache() {
    let app = create_test_app();

    send(&app, "GET", "/data/weather").await;
    send(&app, "GET", "/data/weather").await;

    assert_eq!(app.source.calls(Category::Weather), 1);
}

#[tokio::test]
async fn test_data_endpoint_refresh() {
    let app = create_test_app();

    send(&app, "GET", "/data/weather").await;
    app.source.set_payload(
        Category::Weather,
        json!({"temperature": 12.0, "condition": "rain"}),
    );

    let (_, cached) = send(&app, "GET", "/data/weather").await;
    assert_eq!(cached["items"][0]["temperature"], 28.5);

    let (status, refreshed) = send(&app, "GET", "/data/weather?refresh=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refreshed["items"][0]["temperature"], 12.0);
    assert_eq!(app.source.calls(Category::Weather), 2);
}

#[tokio::test]
async fn test_data_endpoint_unknown_category() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/data/parking").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("parking"));
}

#[tokio::test]
async fn test_data_endpoint_origin_failure() {
    let app = create_test_app();
    app.source.set_failing(Category::Weather, true);

    let (status, json) = send(&app, "GET", "/data/weather").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].as_str().unwrap().contains("weather"));
    assert!(app.cache.is_empty());
}

// == Cache Endpoint Tests ==

#[tokio::test]
async fn test_invalidate_endpoint() {
    let app = create_test_app();
    send(&app, "GET", "/data/weather").await;

    let (status, json) = send(&app, "DELETE", "/cache/weather").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "weather");
    assert!(!app.cache.contains_key("weather"));

    send(&app, "GET", "/data/weather").await;
    assert_eq!(app.source.calls(Category::Weather), 2);
}

#[tokio::test]
async fn test_invalidate_unknown_category() {
    let app = create_test_app();

    let (status, _) = send(&app, "DELETE", "/cache/parking").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_endpoint() {
    let app = create_test_app();
    send(&app, "GET", "/data/weather").await;
    send(&app, "GET", "/data/events").await;

    let (status, json) = send(&app, "DELETE", "/cache").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], 2);
    assert!(app.cache.is_empty());
}

#[tokio::test]
async fn test_entries_endpoint() {
    let app = create_test_app();
    send(&app, "GET", "/data/events").await;

    let (status, json) = send(&app, "GET", "/cache").await;

    assert_eq!(status, StatusCode::OK);
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["key"], "events");
    assert!(entries[0]["expires_at"].is_string());
}

#[tokio::test]
async fn test_clean_endpoint() {
    let app = create_test_app();
    app.cache
        .set("scratch", 1u8, Some(std::time::Duration::ZERO));

    let (status, json) = send(&app, "POST", "/cache/clean").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], 1);
}

// == Stats and Health Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_tracks_hits_and_misses() {
    let app = create_test_app();
    send(&app, "GET", "/data/weather").await; // miss + origin fetch
    send(&app, "GET", "/data/weather").await; // hit

    let (status, json) = send(&app, "GET", "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}
