use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use services::{attendance_service::AttendanceError, auth_service::AuthError, qr::QrError};
use storage::StorageError;

/// Standardized API response wrapper for successful JSON responses.
///
/// This struct enforces a consistent response structure across all endpoints:
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Some message"
/// }
/// ```
///
/// - `T` is the type of the `data` payload.
/// - `message` provides a human-readable context string.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }
}

/// Empty `data` payload for endpoints that only carry a message.
#[derive(Serialize, Default)]
pub struct Empty {}

/// Error body as served to clients: `{"error": "..."}`.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An HTTP-mapped failure. Handlers return `Result<_, ApiError>` and rely on
/// the `From` conversions below for the default status mapping; callers that
/// need a different status for the same failure build one explicitly.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::NotFound(_) => Self::not_found(err.to_string()),
            StorageError::Conflict(_) => Self::bad_request(err.to_string()),
            StorageError::Backend(_) => Self::internal(err.to_string()),
        }
    }
}

impl From<AttendanceError> for ApiError {
    fn from(err: AttendanceError) -> Self {
        match &err {
            AttendanceError::SessionNotFound => Self::not_found(err.to_string()),
            AttendanceError::SessionClosed
            | AttendanceError::AlreadyMarked
            | AttendanceError::OutOfRange { .. } => Self::bad_request(err.to_string()),
            AttendanceError::Storage(_) => Self::internal(err.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::DomainRestricted(_) => Self::bad_request(err.to_string()),
            AuthError::NoOtpRequested | AuthError::OtpExpired | AuthError::InvalidOtp => {
                Self::unauthorized(err.to_string())
            }
            AuthError::EmailDelivery(_) => Self::internal(err.to_string()),
        }
    }
}

impl From<QrError> for ApiError {
    fn from(err: QrError) -> Self {
        match &err {
            QrError::Encode(_) => Self::internal(err.to_string()),
            QrError::InvalidFormat => Self::bad_request(err.to_string()),
        }
    }
}
