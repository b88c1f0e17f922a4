//! Integration tests for the assembled subscription API.
//!
//! These tests drive `api_router` (routes nested under `/api/subscriptions`
//! plus trace, CORS and timeout layers) through `tower::ServiceExt::oneshot`:
//! 1. A full create / read / update / delete lifecycle
//! 2. Price aggregation across users and periods
//! 3. Store failures surfacing as 500 with a message body

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use subscriptions_api::adapters::{api_router, InMemorySubscriptionRepository, SubscriptionAppState};
use subscriptions_api::config::ServerConfig;
use subscriptions_api::domain::foundation::{DomainError, SubscriptionId};
use subscriptions_api::domain::subscription::{
    NewSubscription, Subscription, SubscriptionFilter, SubscriptionPatch,
};
use subscriptions_api::ports::SubscriptionRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Repository whose every call fails like a lost connection.
struct UnavailableRepository;

fn unavailable() -> DomainError {
    DomainError::database("connection reset by peer")
}

#[async_trait]
impl SubscriptionRepository for UnavailableRepository {
    async fn create(&self, _s: &NewSubscription) -> Result<Subscription, DomainError> {
        Err(unavailable())
    }

    async fn get(&self, _id: SubscriptionId) -> Result<Subscription, DomainError> {
        Err(unavailable())
    }

    async fn update(&self, _id: SubscriptionId, _p: &SubscriptionPatch) -> Result<(), DomainError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: SubscriptionId) -> Result<(), DomainError> {
        Err(unavailable())
    }

    async fn list(&self, _f: Option<&SubscriptionFilter>) -> Result<Vec<Subscription>, DomainError> {
        Err(unavailable())
    }
}

fn app_with(repository: Arc<dyn SubscriptionRepository>) -> Router {
    api_router(SubscriptionAppState::new(repository), &ServerConfig::default())
}

fn app() -> Router {
    app_with(Arc::new(InMemorySubscriptionRepository::new()))
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            request = request.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn subscription_lifecycle() {
    let app = app();

    let (status, created) = call(
        &app,
        "POST",
        "/api/subscriptions",
        Some(json!({
            "service_name": "Yandex Plus",
            "price": 400,
            "user_id": "60601fee-2bf1-4721-ae6f-7636e79a0cba",
            "start_date": "07-2025",
            "end_date": "12-2025",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/api/subscriptions/{}", id);

    let (status, body) = call(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["end_date"], "12-2025");

    let (status, _) = call(&app, "PATCH", &uri, Some(json!({"price": 450, "end_date": "0"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(&app, "GET", &uri, None).await;
    assert_eq!(body["price"], 450);
    assert_eq!(body["service_name"], "Yandex Plus");
    assert!(body.get("end_date").is_none());

    let (status, _) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn patch_of_unknown_id_is_not_found() {
    let (status, _) = call(
        &app(),
        "PATCH",
        "/api/subscriptions/404",
        Some(json!({"service_name": "Spotify"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_with_end_before_start_is_bad_request() {
    let app = app();
    let (_, created) = call(
        &app,
        "POST",
        "/api/subscriptions",
        Some(json!({"service_name": "Netflix", "price": 100, "user_id": "u1", "start_date": "06-2025"})),
    )
    .await;
    let uri = format!("/api/subscriptions/{}", created["id"]);

    let (status, _) = call(
        &app,
        "PATCH",
        &uri,
        Some(json!({"start_date": "06-2025", "end_date": "01-2025"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_with_negative_price_is_bad_request() {
    let (status, body) = call(
        &app(),
        "POST",
        "/api/subscriptions",
        Some(json!({"service_name": "Netflix", "price": -5, "user_id": "u1", "start_date": "06-2025"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("price"));
}

// =============================================================================
// Aggregation
// =============================================================================

#[tokio::test]
async fn calc_respects_user_and_period_filters() {
    let app = app();
    let rows = [
        ("u1", "Netflix", 100, "01-2025", Some("03-2025")),
        ("u1", "Spotify", 250, "02-2025", Some("02-2025")),
        ("u1", "Kinopoisk", 0, "02-2025", None),
        ("u2", "Netflix", 999, "02-2025", Some("03-2025")),
    ];
    for (user, service, price, start, end) in rows {
        let mut body = json!({"service_name": service, "price": price, "user_id": user, "start_date": start});
        if let Some(end) = end {
            body["end_date"] = json!(end);
        }
        let (status, _) = call(&app, "POST", "/api/subscriptions", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = call(&app, "POST", "/api/subscriptions/calc", Some(json!({"user_id": "u1"}))).await;
    assert_eq!(body["price"], 350);

    // Open-ended rows never satisfy an end_date bound.
    let (_, body) = call(
        &app,
        "POST",
        "/api/subscriptions/calc",
        Some(json!({"user_id": "u1", "start_date": "02-2025", "end_date": "03-2025"})),
    )
    .await;
    assert_eq!(body["price"], 250);

    let (_, body) = call(
        &app,
        "POST",
        "/api/subscriptions/calc",
        Some(json!({"service_name": "Netflix"})),
    )
    .await;
    assert_eq!(body["price"], 1099);
}

#[tokio::test]
async fn list_without_filter_returns_everything_in_insertion_order() {
    let app = app();
    for user in ["u1", "u2", "u3"] {
        call(
            &app,
            "POST",
            "/api/subscriptions",
            Some(json!({"service_name": "Netflix", "price": 100, "user_id": user, "start_date": "01-2025"})),
        )
        .await;
    }

    let (status, body) = call(&app, "GET", "/api/subscriptions", None).await;
    assert_eq!(status, StatusCode::OK);
    let users: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["user_id"].as_str().unwrap())
        .collect();
    assert_eq!(users, vec!["u1", "u2", "u3"]);
}

// =============================================================================
// Store failures
// =============================================================================

#[tokio::test]
async fn store_failure_is_internal_error_with_message() {
    let app = app_with(Arc::new(UnavailableRepository));

    let (status, body) = call(&app, "GET", "/api/subscriptions", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().unwrap().contains("connection reset"));

    let (status, _) = call(&app, "GET", "/api/subscriptions/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = call(&app, "POST", "/api/subscriptions/calc", Some(json!({"user_id": "u1"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
