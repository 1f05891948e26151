use axum::{
    Router,
    middleware::from_fn,
    routing::{get, patch, post},
};

use crate::auth::guards::{allow_authenticated, require_teacher};
use crate::state::AppState;

mod common;
mod get;
mod patch;
mod post;

pub use self::common::SessionResponse;
pub use get::{get_session, list_sessions};
pub use patch::close_session;
pub use post::create_session;

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/create-session",
            post(create_session).route_layer(from_fn(require_teacher)),
        )
        .route(
            "/sessions",
            get(list_sessions).route_layer(from_fn(require_teacher)),
        )
        .route(
            "/session/{session_id}",
            get(get_session).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/session/{session_id}/close",
            patch(close_session).route_layer(from_fn(require_teacher)),
        )
}
