//! Attendance marking: the geofence + duplicate-prevention engine.
//!
//! Every check runs before anything is written; the only mutation is the
//! final record insert, so a rejected submission leaves no trace.

use std::sync::Arc;

use storage::{
    AttendanceStorage, StorageError,
    models::{AttendanceRecord, Session},
};
use thiserror::Error;

use crate::location::{LocationCheck, validate_location};

#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("Session not found")]
    SessionNotFound,

    #[error("Session is no longer active")]
    SessionClosed,

    #[error("Attendance already marked for this session")]
    AlreadyMarked,

    #[error("You are {distance_m}m away from the session location. Maximum allowed: {allowed_radius_m}m")]
    OutOfRange {
        distance_m: i64,
        allowed_radius_m: i32,
    },

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for AttendanceError {
    fn from(err: StorageError) -> Self {
        match err {
            // The conditional insert lost a race with a concurrent
            // submission holding one of the duplicate keys.
            StorageError::Conflict(_) => AttendanceError::AlreadyMarked,
            other => AttendanceError::Storage(other),
        }
    }
}

/// A marking request, identity fields already taken from the verified token
/// where applicable (`student_email`).
#[derive(Debug, Clone)]
pub struct MarkAttendance {
    pub session_id: String,
    pub student_id: String,
    pub student_name: String,
    pub student_email: String,
    pub device_id: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// The created record plus the distance-bearing message shown to the student.
#[derive(Debug, Clone)]
pub struct MarkOutcome {
    pub record: AttendanceRecord,
    pub message: String,
}

/// A session together with its attendance listing.
#[derive(Debug, Clone)]
pub struct SessionAttendance {
    pub session: Session,
    pub records: Vec<AttendanceRecord>,
    pub total_count: usize,
}

pub struct AttendanceService {
    storage: Arc<dyn AttendanceStorage>,
}

impl AttendanceService {
    pub fn new(storage: Arc<dyn AttendanceStorage>) -> Self {
        Self { storage }
    }

    /// Validates and records one attendance submission.
    ///
    /// Check order: session exists → session active → not already marked (by
    /// student id OR device id) → within radius. Distance is computed before
    /// the radius decision and surfaced either way.
    pub async fn mark_attendance(
        &self,
        params: MarkAttendance,
    ) -> Result<MarkOutcome, AttendanceError> {
        let session = self
            .storage
            .get_session(&params.session_id)
            .await?
            .ok_or(AttendanceError::SessionNotFound)?;

        if !session.is_active() {
            return Err(AttendanceError::SessionClosed);
        }

        if self
            .storage
            .has_attendance(
                &params.session_id,
                &params.student_id,
                Some(&params.device_id),
            )
            .await?
        {
            return Err(AttendanceError::AlreadyMarked);
        }

        let check: LocationCheck = validate_location(
            session.latitude,
            session.longitude,
            session.radius,
            params.latitude,
            params.longitude,
        );

        if !check.within_range {
            return Err(AttendanceError::OutOfRange {
                distance_m: check.distance_m,
                allowed_radius_m: check.allowed_radius_m,
            });
        }

        let record = AttendanceRecord::new(
            params.session_id,
            params.student_id,
            params.student_name,
            params.student_email,
            params.device_id,
            params.latitude,
            params.longitude,
            check.distance_m as i32,
        );

        let record = self.storage.insert_attendance(record).await?;
        tracing::info!(
            session_id = %record.session_id,
            student_id = %record.student_id,
            distance_m = record.distance,
            "attendance recorded"
        );

        Ok(MarkOutcome {
            record,
            message: check.message,
        })
    }

    /// Read-only probe for the "have I already marked attendance" check.
    pub async fn check_duplicate(
        &self,
        session_id: &str,
        student_id: &str,
        device_id: Option<&str>,
    ) -> Result<bool, AttendanceError> {
        Ok(self
            .storage
            .has_attendance(session_id, student_id, device_id)
            .await?)
    }

    pub async fn attendance_for_session(
        &self,
        session_id: &str,
    ) -> Result<SessionAttendance, AttendanceError> {
        let session = self
            .storage
            .get_session(session_id)
            .await?
            .ok_or(AttendanceError::SessionNotFound)?;

        let records = self.storage.attendance_for_session(session_id).await?;
        let total_count = records.len();

        Ok(SessionAttendance {
            session,
            records,
            total_count,
        })
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::{MemoryStorage, models::SessionStatus};

    const ANCHOR: (f64, f64) = (26.9124, 75.7873);

    async fn seeded_service() -> (AttendanceService, Session, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let session = storage
            .create_session(Session::new(
                "Dr. Rao",
                "rao@mnit.ac.in",
                "Data Structures",
                ANCHOR.0,
                ANCHOR.1,
                50,
            ))
            .await
            .unwrap();
        (
            AttendanceService::new(storage.clone()),
            session,
            storage,
        )
    }

    fn submission(session_id: &str, student_id: &str, device_id: &str) -> MarkAttendance {
        MarkAttendance {
            session_id: session_id.into(),
            student_id: student_id.into(),
            student_name: "Asha Verma".into(),
            student_email: "asha@mnit.ac.in".into(),
            device_id: device_id.into(),
            latitude: 26.9124,
            longitude: 75.7874,
        }
    }

    #[tokio::test]
    async fn in_range_submission_creates_record_with_distance() {
        let (svc, session, _) = seeded_service().await;

        let outcome = svc
            .mark_attendance(submission(&session.session_id, "2023UCP1234", "dev-a"))
            .await
            .unwrap();

        assert_eq!(outcome.record.session_id, session.session_id);
        assert!(outcome.record.distance <= 50);
        assert!(outcome.message.starts_with("Location verified ("));

        let listing = svc
            .attendance_for_session(&session.session_id)
            .await
            .unwrap();
        assert_eq!(listing.total_count, 1);
        assert_eq!(listing.records[0].student_id, "2023UCP1234");
    }

    #[tokio::test]
    async fn out_of_range_submission_is_rejected_without_writing() {
        let (svc, session, _) = seeded_service().await;

        let mut params = submission(&session.session_id, "2023UCP1234", "dev-a");
        params.latitude = 26.9124;
        params.longitude = 75.7880;

        let err = svc.mark_attendance(params).await.unwrap_err();
        let message = err.to_string();
        assert!(
            matches!(err, AttendanceError::OutOfRange { allowed_radius_m: 50, .. }),
            "unexpected error {message}"
        );
        assert!(message.contains("m away from the session location"));
        assert!(message.ends_with("Maximum allowed: 50m"));

        // rejection must leave no partial state behind
        let listing = svc
            .attendance_for_session(&session.session_id)
            .await
            .unwrap();
        assert_eq!(listing.total_count, 0);
    }

    #[tokio::test]
    async fn duplicate_student_id_is_rejected_even_from_new_device() {
        let (svc, session, _) = seeded_service().await;

        svc.mark_attendance(submission(&session.session_id, "2023UCP1234", "dev-a"))
            .await
            .unwrap();

        let err = svc
            .mark_attendance(submission(&session.session_id, "2023UCP1234", "dev-b"))
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::AlreadyMarked));
    }

    #[tokio::test]
    async fn duplicate_device_id_is_rejected_even_for_new_student() {
        let (svc, session, _) = seeded_service().await;

        svc.mark_attendance(submission(&session.session_id, "2023UCP1234", "dev-a"))
            .await
            .unwrap();

        let err = svc
            .mark_attendance(submission(&session.session_id, "2023UCP9999", "dev-a"))
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::AlreadyMarked));
    }

    #[tokio::test]
    async fn closed_session_rejects_even_valid_locations() {
        let (svc, session, storage) = seeded_service().await;

        storage
            .update_session_status(&session.session_id, SessionStatus::Closed)
            .await
            .unwrap();

        let err = svc
            .mark_attendance(submission(&session.session_id, "2023UCP1234", "dev-a"))
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::SessionClosed));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let (svc, _, _) = seeded_service().await;

        let err = svc
            .mark_attendance(submission("no-such-session", "2023UCP1234", "dev-a"))
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::SessionNotFound));
    }

    #[tokio::test]
    async fn duplicate_probe_matches_either_key() {
        let (svc, session, _) = seeded_service().await;
        let sid = &session.session_id;

        assert!(!svc.check_duplicate(sid, "2023UCP1234", None).await.unwrap());

        svc.mark_attendance(submission(sid, "2023UCP1234", "dev-a"))
            .await
            .unwrap();

        assert!(svc.check_duplicate(sid, "2023UCP1234", None).await.unwrap());
        assert!(
            svc.check_duplicate(sid, "other-student", Some("dev-a"))
                .await
                .unwrap()
        );
        assert!(
            !svc.check_duplicate(sid, "other-student", Some("dev-b"))
                .await
                .unwrap()
        );
    }
}
