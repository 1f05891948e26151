use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use super::common::{
    AttendanceListResponse, AttendanceRecordResponse, CheckAttendanceResponse,
};
use crate::auth::AuthUser;
use crate::response::{ApiError, ApiResponse};
use crate::routes::sessions::SessionResponse;
use crate::state::AppState;

/// GET /api/attendance/{session_id}
///
/// The owning teacher's view of a session's records.
///
/// ### Responses
/// - `200 OK` → `{ session, attendance: [...], totalCount }`
/// - `403 Forbidden` → token email does not own the session
/// - `404 Not Found` → unknown session
pub async fn get_attendance(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Result<Json<ApiResponse<AttendanceListResponse>>, ApiError> {
    let session = state
        .sessions()
        .get_session(&session_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Session not found"))?;

    if session.faculty_email != claims.sub {
        return Err(ApiError::forbidden(
            "You do not have permission to view this attendance list",
        ));
    }

    let listing = state.attendance().attendance_for_session(&session_id).await?;

    let response = AttendanceListResponse {
        session: SessionResponse::from(listing.session),
        attendance: listing
            .records
            .into_iter()
            .map(AttendanceRecordResponse::from)
            .collect(),
        total_count: listing.total_count,
    };

    Ok(Json(ApiResponse::success(
        response,
        "Attendance fetched successfully",
    )))
}

#[derive(Debug, Deserialize)]
pub struct DeviceQuery {
    #[serde(rename = "deviceId")]
    pub device_id: Option<String>,
}

/// GET /api/check-attendance/{session_id}/{student_id}?deviceId=
///
/// Pre-submission probe: has this student (or this device) already marked
/// attendance for the session?
pub async fn check_attendance(
    State(state): State<AppState>,
    Path((session_id, student_id)): Path<(String, String)>,
    Query(query): Query<DeviceQuery>,
) -> Result<Json<ApiResponse<CheckAttendanceResponse>>, ApiError> {
    let has_marked = state
        .attendance()
        .check_duplicate(&session_id, &student_id, query.device_id.as_deref())
        .await?;

    Ok(Json(ApiResponse::success(
        CheckAttendanceResponse {
            session_id,
            has_marked_attendance: has_marked,
        },
        "Attendance status fetched",
    )))
}
