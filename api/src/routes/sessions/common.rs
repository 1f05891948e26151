use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::response::ApiError;
use services::qr::QrPayload;
use storage::models::{Session, SessionStatus};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, message = "Faculty name and subject are required"))]
    pub faculty_name: String,

    #[validate(length(min = 1, message = "Faculty name and subject are required"))]
    pub subject: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Invalid coordinates provided"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Invalid coordinates provided"))]
    pub longitude: f64,

    /// Geofence radius in meters; server default applies when omitted.
    #[validate(range(min = 1, message = "Radius must be a positive number of meters"))]
    pub radius: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub faculty_name: String,
    pub faculty_email: String,
    pub subject: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: i32,
    pub created_at: String,
    pub status: SessionStatus,
    /// JSON payload the session QR code encodes; present only when asked for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            created_at: session.created_at.to_rfc3339(),
            session_id: session.session_id,
            faculty_name: session.faculty_name,
            faculty_email: session.faculty_email,
            subject: session.subject,
            latitude: session.latitude,
            longitude: session.longitude,
            radius: session.radius,
            status: session.status,
            qr_code: None,
        }
    }
}

impl SessionResponse {
    pub fn with_qr(session: Session) -> Result<Self, ApiError> {
        let qr_code = QrPayload::for_session(&session).encode()?;
        let mut base = Self::from(session);
        base.qr_code = Some(qr_code);
        Ok(base)
    }
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub count: usize,
    pub sessions: Vec<SessionResponse>,
}
