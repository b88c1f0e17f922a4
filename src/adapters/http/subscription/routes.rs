//! Route configuration for subscription endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    calculate_price, create_subscription, delete_subscription, get_subscription,
    list_subscriptions, update_subscription, SubscriptionAppState,
};

/// Creates the subscription router, relative to its mount point.
///
/// Routes:
/// - `POST /` - Create a subscription
/// - `GET /` - List subscriptions (optional `user_id`, `service_name`, `start_date`, `end_date`)
/// - `POST /calc` - Sum prices over a filter
/// - `GET /:id` - Read one subscription
/// - `PATCH /:id` - Partially update a subscription
/// - `DELETE /:id` - Delete a subscription
pub fn subscription_router() -> Router<SubscriptionAppState> {
    Router::new()
        .route("/", post(create_subscription).get(list_subscriptions))
        .route("/calc", post(calculate_price))
        .route(
            "/:id",
            get(get_subscription)
                .patch(update_subscription)
                .delete(delete_subscription),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySubscriptionRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let state = SubscriptionAppState::new(Arc::new(InMemorySubscriptionRepository::new()));
        subscription_router().with_state(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
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

    async fn create(app: &Router, user: &str, service: &str, price: i64) -> i64 {
        let (status, body) = send(
            app,
            "POST",
            "/",
            Some(json!({
                "service_name": service,
                "price": price,
                "user_id": user,
                "start_date": "07-2025",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn create_then_get_returns_wire_object() {
        let app = app();
        let id = create(&app, "u1", "Yandex Plus", 400).await;

        let (status, body) = send(&app, "GET", &format!("/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "id": id,
                "service_name": "Yandex Plus",
                "price": 400,
                "user_id": "u1",
                "start_date": "07-2025",
            })
        );
    }

    #[tokio::test]
    async fn patching_end_date_with_zero_clears_it() {
        let app = app();
        let (_, created) = send(
            &app,
            "POST",
            "/",
            Some(json!({
                "service_name": "Netflix",
                "price": 100,
                "user_id": "u1",
                "start_date": "01-2025",
                "end_date": "12-2025",
            })),
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        let (status, _) = send(&app, "PATCH", &format!("/{}", id), Some(json!({"end_date": "0"}))).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, "GET", &format!("/{}", id), None).await;
        assert!(body.get("end_date").is_none());
    }

    #[tokio::test]
    async fn deleting_twice_is_204_then_404() {
        let app = app();
        let id = create(&app, "u1", "Netflix", 100).await;

        let (first, _) = send(&app, "DELETE", &format!("/{}", id), None).await;
        let (second, body) = send(&app, "DELETE", &format!("/{}", id), None).await;

        assert_eq!(first, StatusCode::NO_CONTENT);
        assert_eq!(second, StatusCode::NOT_FOUND);
        assert!(body["message"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn calc_sums_prices_for_user() {
        let app = app();
        for price in [100, 250, 0] {
            create(&app, "u1", "Netflix", price).await;
        }
        create(&app, "u2", "Netflix", 999).await;

        let (status, body) = send(&app, "POST", "/calc", Some(json!({"user_id": "u1"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"price": 350}));
    }

    #[tokio::test]
    async fn calc_without_filter_is_bad_request() {
        let (status, _) = send(&app(), "POST", "/calc", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_filters_by_user_id_query() {
        let app = app();
        create(&app, "u1", "Netflix", 100).await;
        create(&app, "u2", "Netflix", 200).await;
        create(&app, "u1", "Spotify", 300).await;

        let (status, body) = send(&app, "GET", "/?user_id=u1", None).await;
        assert_eq!(status, StatusCode::OK);
        let services: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["service_name"].as_str().unwrap())
            .collect();
        assert_eq!(services, vec!["Netflix", "Spotify"]);
    }

    #[tokio::test]
    async fn list_with_bad_date_is_bad_request() {
        let (status, _) = send(&app(), "GET", "/?start_date=2025-07", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_patch_is_bad_request() {
        let app = app();
        let id = create(&app, "u1", "Netflix", 100).await;

        let (status, _) = send(&app, "PATCH", &format!("/{}", id), Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let (status, body) = send(&app(), "GET", "/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let (status, _) = send(&app(), "GET", "/9999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"service_name":"Netflix"}"#))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_with_blank_start_date_is_bad_request() {
        let (status, body) = send(
            &app(),
            "POST",
            "/",
            Some(json!({
                "service_name": "Netflix",
                "price": 100,
                "user_id": "u1",
                "start_date": "",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("start_date"));
    }

    #[tokio::test]
    async fn list_end_date_bound_excludes_open_ended_rows() {
        let app = app();
        for (service, end) in [("Netflix", Some("03-2025")), ("Spotify", Some("09-2025")), ("Kinopoisk", None)] {
            let mut body = json!({
                "service_name": service,
                "price": 100,
                "user_id": "u1",
                "start_date": "01-2025",
            });
            if let Some(end) = end {
                body["end_date"] = json!(end);
            }
            let (status, _) = send(&app, "POST", "/", Some(body)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, "GET", "/?end_date=06-2025", None).await;
        assert_eq!(status, StatusCode::OK);
        let services: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["service_name"].as_str().unwrap())
            .collect();
        assert_eq!(services, vec!["Netflix"]);
    }

    #[tokio::test]
    async fn calc_overflow_is_bad_request() {
        let app = app();
        create(&app, "ov", "Netflix", i64::MAX).await;
        create(&app, "ov", "Spotify", i64::MAX).await;

        let (status, body) = send(&app, "POST", "/calc", Some(json!({"user_id": "ov"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }
}
