use std::sync::Arc;
use axum::Router;
use axum::routing::{get, post};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use crate::routes::{health, notify};
use crate::state::AppState;

pub(crate) fn axum_app(state: Arc<AppState>) -> Router {
    Router::new()
        // 宿主平台的函数触发入口
        .route("/", post(notify::receive_trigger_handler))
        .route("/health", get(health::health_handler))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).latency_unit(LatencyUnit::Millis))
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::tests::{RecordingChannel, state_with};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn trigger(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let channel = RecordingChannel::accepting();
        let state = state_with(channel, "PUSHBRIDGE_TEST_ROUTE_HEALTH", None);
        let app = axum_app(Arc::new(state));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_trigger_route_relays_booking() {
        let channel = RecordingChannel::accepting();
        let state = state_with(channel.clone(), "PUSHBRIDGE_TEST_ROUTE_BOOKING", Some("k"));
        let app = axum_app(Arc::new(state));

        let response = app
            .oneshot(trigger(
                r#"{"event":"databases.db1.collections.bookings.documents.doc1.create","payload":{"$id":"doc1"}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["notification"]["title"], json!("📅 New Booking"));
        assert_eq!(body["notification"]["body"], json!("Booking doc1 created"));
        assert_eq!(body["documentId"], json!("doc1"));
        assert_eq!(channel.calls(), 1);
    }

    #[tokio::test]
    async fn test_trigger_route_without_key_is_400() {
        let channel = RecordingChannel::accepting();
        let state = state_with(channel.clone(), "PUSHBRIDGE_TEST_ROUTE_NOKEY", None);
        let app = axum_app(Arc::new(state));

        let response = app
            .oneshot(trigger(r#"{"event":"databases.x.collections.rooms.documents.r.create"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(channel.calls(), 0);
    }

    #[tokio::test]
    async fn test_trigger_route_accepts_missing_content_type() {
        let channel = RecordingChannel::accepting();
        let state = state_with(channel.clone(), "PUSHBRIDGE_TEST_ROUTE_PLAIN", Some("k"));
        let app = axum_app(Arc::new(state));

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"event":"databases.x.collections.bookings.documents.b1.delete"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["message"], json!("Event type not supported"));
        assert_eq!(channel.calls(), 0);
    }
}
