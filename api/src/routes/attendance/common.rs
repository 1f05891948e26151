use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::routes::sessions::SessionResponse;
use storage::models::AttendanceRecord;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    #[validate(length(min = 1, message = "Session ID is required"))]
    pub session_id: String,

    #[validate(length(min = 1, message = "Student ID and name are required"))]
    pub student_id: String,

    #[validate(length(min = 1, message = "Student ID and name are required"))]
    pub student_name: String,

    #[validate(length(min = 1, message = "Device fingerprint is required"))]
    pub device_id: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Invalid coordinates provided"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Invalid coordinates provided"))]
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordResponse {
    pub record_id: String,
    pub session_id: String,
    pub student_id: String,
    pub student_name: String,
    pub student_email: String,
    pub device_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance: i32,
    pub marked_at: String,
}

impl From<AttendanceRecord> for AttendanceRecordResponse {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            marked_at: record.marked_at.to_rfc3339(),
            record_id: record.record_id,
            session_id: record.session_id,
            student_id: record.student_id,
            student_name: record.student_name,
            student_email: record.student_email,
            device_id: record.device_id,
            latitude: record.latitude,
            longitude: record.longitude,
            distance: record.distance,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceListResponse {
    pub session: SessionResponse,
    pub attendance: Vec<AttendanceRecordResponse>,
    pub total_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAttendanceResponse {
    pub session_id: String,
    pub has_marked_attendance: bool,
}
