use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};

use crate::auth::guards::{require_student, require_teacher};
use crate::state::AppState;

mod common;
mod get;
mod post;

pub use get::{check_attendance, get_attendance};
pub use post::mark_attendance;

pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/mark-attendance",
            post(mark_attendance).route_layer(from_fn(require_student)),
        )
        .route(
            "/attendance/{session_id}",
            get(get_attendance).route_layer(from_fn(require_teacher)),
        )
        .route(
            "/check-attendance/{session_id}/{student_id}",
            get(check_attendance).route_layer(from_fn(require_student)),
        )
}
