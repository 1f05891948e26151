//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain, each protected via the appropriate access
//! control middleware:
//! - `/health` → liveness check (public)
//! - `/auth` → OTP issuance and redemption (public), token echo
//! - session endpoints → faculty-facing session lifecycle (teacher role)
//! - attendance endpoints → student submission + faculty listing
//! - export endpoints → CSV download and JSON summary (teacher role)

use axum::Router;

use crate::state::AppState;

pub mod attendance;
pub mod auth;
pub mod export;
pub mod health;
pub mod sessions;

/// Builds the complete application router for all HTTP endpoints.
///
/// The session, attendance and export groups use the original flat paths
/// (`/create-session`, `/mark-attendance`, ...) rather than nesting, which is
/// why they are merged instead of mounted under a prefix.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/auth", auth::auth_routes())
        .merge(sessions::session_routes())
        .merge(attendance::attendance_routes())
        .merge(export::export_routes())
        .with_state(app_state)
}
