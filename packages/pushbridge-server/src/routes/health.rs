use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub(crate) async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
