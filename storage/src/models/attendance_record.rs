use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One student's attendance mark for one session.
///
/// Records are immutable after creation and never deleted in normal
/// operation. Within a session, both `student_id` and `device_id` are unique
/// across records; either key matching an existing record blocks a new one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub record_id: String,
    pub session_id: String,
    pub student_id: String,
    pub student_name: String,
    pub student_email: String,
    /// Opaque per-device fingerprint, the second duplicate-prevention key.
    pub device_id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance from the session anchor in whole meters, computed at creation.
    pub distance: i32,
    pub marked_at: DateTime<Utc>,
}

impl AttendanceRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        session_id: impl Into<String>,
        student_id: impl Into<String>,
        student_name: impl Into<String>,
        student_email: impl Into<String>,
        device_id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        distance: i32,
    ) -> Self {
        Self {
            record_id: Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            student_id: student_id.into(),
            student_name: student_name.into(),
            student_email: student_email.into(),
            device_id: device_id.into(),
            latitude,
            longitude,
            distance,
            marked_at: Utc::now(),
        }
    }
}
