use axum::{Router, middleware::from_fn, routing::get};

use crate::auth::guards::require_teacher;
use crate::state::AppState;

mod get;

pub use get::{attendance_summary, export_attendance_csv};

pub fn export_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/export-attendance/{session_id}",
            get(export_attendance_csv).route_layer(from_fn(require_teacher)),
        )
        .route(
            "/attendance-summary/{session_id}",
            get(attendance_summary).route_layer(from_fn(require_teacher)),
        )
}
