use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

// GET /status
pub async fn status() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
