use axum::{Json, Router, routing::get};
use chrono::Utc;
use serde_json::{Value, json};

use crate::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}

/// GET /api/health
///
/// Public liveness check.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "QR Attendance API is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
