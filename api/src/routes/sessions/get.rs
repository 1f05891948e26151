use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use super::common::{SessionListResponse, SessionResponse};
use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    /// `?withQR=true` regenerates the QR payload alongside the session.
    #[serde(rename = "withQR")]
    pub with_qr: Option<String>,
}

/// GET /api/session/{session_id}
///
/// Fetches one session. Any authenticated user may look a session up (a
/// student lands here after scanning a code).
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let session = state
        .sessions()
        .get_session(&session_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Session not found"))?;

    let response = if query.with_qr.as_deref() == Some("true") {
        SessionResponse::with_qr(session)?
    } else {
        SessionResponse::from(session)
    };

    Ok(Json(ApiResponse::success(
        response,
        "Session fetched successfully",
    )))
}

/// GET /api/sessions
///
/// Lists all sessions, newest first, for the faculty dashboard.
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SessionListResponse>>, ApiError> {
    let sessions = state.sessions().list_sessions().await?;

    let response = SessionListResponse {
        count: sessions.len(),
        sessions: sessions.into_iter().map(SessionResponse::from).collect(),
    };

    Ok(Json(ApiResponse::success(
        response,
        "Sessions fetched successfully",
    )))
}
