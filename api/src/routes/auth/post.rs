use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::{ApiError, ApiResponse, Empty};
use crate::state::AppState;
use common::format_validation_errors;
use services::auth_service::Role;

lazy_static::lazy_static! {
    static ref OTP_REGEX: regex::Regex = regex::Regex::new(r"^\d{6}$").unwrap();
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Defaults to student when omitted.
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(regex(path = *OTP_REGEX, message = "OTP must be a 6-digit code"))]
    pub otp: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub email: String,
    pub role: Role,
}

/// POST /api/auth/send-otp
///
/// Issues a one-time code for the email and delivers it over SMTP (or logs
/// it when no transport is configured). Students must use an institutional
/// address; teachers may use any.
///
/// ### Responses
/// - `200 OK` → `{ "success": true, "data": {}, "message": "OTP sent successfully" }`
/// - `400 Bad Request` → validation failure or restricted domain
/// - `500 Internal Server Error` → delivery failure (the code stays valid)
pub async fn send_otp(
    State(state): State<AppState>,
    Json(req): Json<SendOtpRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Empty>>), ApiError> {
    if let Err(validation_errors) = req.validate() {
        return Err(ApiError::bad_request(format_validation_errors(
            &validation_errors,
        )));
    }

    let role = req.role.unwrap_or(Role::Student);
    state.auth().request_otp(&req.email, role).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            Empty::default(),
            "OTP sent successfully",
        )),
    ))
}

/// POST /api/auth/verify-otp
///
/// Redeems a pending code exactly once and returns the signed identity
/// token.
///
/// ### Responses
/// - `200 OK` → `{ "success": true, "token": "...", "email": "...", "role": "student" }`
/// - `400 Bad Request` → validation failure
/// - `401 Unauthorized` → no pending code, expired code, or wrong code
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if let Err(validation_errors) = req.validate() {
        return Err(ApiError::bad_request(format_validation_errors(
            &validation_errors,
        )));
    }

    let verified = state
        .auth()
        .verify_otp(&req.email, &req.otp, Utc::now())
        .await?;

    let (token, _expires_at) = generate_jwt(&verified.email, verified.role);

    Ok(Json(LoginResponse {
        success: true,
        token,
        email: verified.email,
        role: verified.role,
    }))
}
