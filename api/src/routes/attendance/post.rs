use axum::{Extension, Json, extract::State, http::StatusCode};

use super::common::{AttendanceRecordResponse, MarkAttendanceRequest};
use crate::auth::AuthUser;
use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;
use common::format_validation_errors;
use services::attendance_service::{AttendanceError, MarkAttendance};
use validator::Validate;

/// POST /api/mark-attendance
///
/// Runs the geofence + duplicate engine for one submission. The student's
/// email is taken from the token, never from the body.
///
/// ### Responses
/// - `201 Created` → the stored record; message echoes the verified distance
/// - `400 Bad Request` → validation failure, unknown/closed session,
///   duplicate student or device, or out-of-range position (message carries
///   the computed distance and the allowed radius)
/// - `401 / 403` → missing token / not a student
pub async fn mark_attendance(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<MarkAttendanceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AttendanceRecordResponse>>), ApiError> {
    if let Err(validation_errors) = req.validate() {
        return Err(ApiError::bad_request(format_validation_errors(
            &validation_errors,
        )));
    }

    let outcome = state
        .attendance()
        .mark_attendance(MarkAttendance {
            session_id: req.session_id,
            student_id: req.student_id,
            student_name: req.student_name,
            student_email: claims.sub,
            device_id: req.device_id,
            latitude: req.latitude,
            longitude: req.longitude,
        })
        .await
        .map_err(|err| match err {
            // A missing session is a business failure here, not a 404: the
            // submission referenced it, so the request itself is bad.
            AttendanceError::SessionNotFound => ApiError::bad_request(err.to_string()),
            other => ApiError::from(other),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            AttendanceRecordResponse::from(outcome.record),
            outcome.message,
        )),
    ))
}
