use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use super::common::{CreateSessionRequest, SessionResponse};
use crate::auth::AuthUser;
use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;
use common::format_validation_errors;
use services::session_service::CreateSession;

/// POST /api/create-session
///
/// Creates an active, location-anchored attendance session owned by the
/// authenticated teacher. The response carries the QR payload so the client
/// can render the code immediately.
///
/// ### Responses
/// - `201 Created` → session data (including `qrCode`)
/// - `400 Bad Request` → validation failure
/// - `401 / 403` → missing token / not a teacher
pub async fn create_session(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SessionResponse>>), ApiError> {
    if let Err(validation_errors) = req.validate() {
        return Err(ApiError::bad_request(format_validation_errors(
            &validation_errors,
        )));
    }

    let session = state
        .sessions()
        .create_session(CreateSession {
            faculty_name: req.faculty_name,
            faculty_email: claims.sub,
            subject: req.subject,
            latitude: req.latitude,
            longitude: req.longitude,
            radius: req.radius,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            SessionResponse::with_qr(session)?,
            "Session created successfully",
        )),
    ))
}
