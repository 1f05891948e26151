use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// Lifecycle state of an attendance session.
///
/// A session is created `Active` and transitions to `Closed` exactly once;
/// there is no way back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Closed,
}

/// A faculty-created, location-anchored attendance window.
///
/// Apart from `status`, every field is immutable after creation. The session
/// is owned by `faculty_email` (the creating token's identity); close, export
/// and attendance-view operations are gated on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
    pub faculty_name: String,
    pub faculty_email: String,
    pub subject: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Geofence radius in meters. Always positive.
    pub radius: i32,
    pub created_at: DateTime<Utc>,
    pub status: SessionStatus,
}

impl Session {
    pub fn new(
        faculty_name: impl Into<String>,
        faculty_email: impl Into<String>,
        subject: impl Into<String>,
        latitude: f64,
        longitude: f64,
        radius: i32,
    ) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            faculty_name: faculty_name.into(),
            faculty_email: faculty_email.into(),
            subject: subject.into(),
            latitude,
            longitude,
            radius,
            created_at: Utc::now(),
            status: SessionStatus::Active,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }
}
