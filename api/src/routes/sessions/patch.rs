use axum::{
    Extension, Json,
    extract::{Path, State},
};

use super::common::SessionResponse;
use crate::auth::AuthUser;
use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;

/// PATCH /api/session/{session_id}/close
///
/// Transitions the session to closed. Only the owning teacher may close it;
/// the transition is one-way.
///
/// ### Responses
/// - `200 OK` → the closed session
/// - `403 Forbidden` → token email does not own the session
/// - `404 Not Found` → unknown session
pub async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let session = state
        .sessions()
        .get_session(&session_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Session not found"))?;

    if session.faculty_email != claims.sub {
        return Err(ApiError::forbidden(
            "You do not have permission to close this session",
        ));
    }

    let closed = state
        .sessions()
        .close_session(&session_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Session not found"))?;

    Ok(Json(ApiResponse::success(
        SessionResponse::from(closed),
        "Session closed successfully",
    )))
}
