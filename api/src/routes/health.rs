use crate::response::ApiResponse;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use util::state::AppState;

/// GET /api/health
///
/// Liveness probe. Public, no authentication.
async fn health() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(
        json!({ "status": "ok" }),
        "Service is healthy",
    ))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}
