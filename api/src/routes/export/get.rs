use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, header},
};

use crate::auth::AuthUser;
use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;
use services::export_service::AttendanceSummary;
use storage::models::Session;

async fn owned_session(
    state: &AppState,
    session_id: &str,
    owner_email: &str,
    denial: &'static str,
) -> Result<Session, ApiError> {
    let session = state
        .sessions()
        .get_session(session_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Session not found"))?;

    if session.faculty_email != owner_email {
        return Err(ApiError::forbidden(denial));
    }
    Ok(session)
}

/// GET /api/export-attendance/{session_id}
///
/// Streams the session's records as a CSV attachment.
///
/// **Response**: `text/csv` attachment with columns
/// `No,Student ID,Student Name,Marked At,Distance (m)` and a session info
/// block at the top when records exist.
pub async fn export_attendance_csv(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Result<(HeaderMap, String), ApiError> {
    owned_session(
        &state,
        &session_id,
        &claims.sub,
        "You do not have permission to export this attendance",
    )
    .await?;

    let export = state.exports().export_csv(&session_id).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", export.filename))
            .map_err(|_| ApiError::internal("Failed to build export headers"))?,
    );

    Ok((headers, export.csv))
}

/// GET /api/attendance-summary/{session_id}
///
/// JSON roll-call view of the session for the owning teacher.
pub async fn attendance_summary(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Result<Json<ApiResponse<AttendanceSummary>>, ApiError> {
    owned_session(
        &state,
        &session_id,
        &claims.sub,
        "You do not have permission to view this summary",
    )
    .await?;

    let summary = state.exports().summary(&session_id).await?;

    Ok(Json(ApiResponse::success(
        summary,
        "Attendance summary fetched successfully",
    )))
}
