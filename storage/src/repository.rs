use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{AttendanceRecord, Session, SessionStatus};

/// The storage contract the engines run against.
///
/// This is the spreadsheet-shaped async CRUD surface: sessions and attendance
/// records addressed by opaque string ids. Implementations may be backed by
/// anything that can honor the contract; the in-memory map backend in
/// [`crate::memory`] is the one this process ships with.
///
/// `insert_attendance` is a conditional write: it must refuse with
/// [`StorageError::Conflict`] when the session already holds a record with
/// the same `student_id` OR the same `device_id`, and the check and insert
/// must be atomic with respect to concurrent inserts.
#[async_trait]
pub trait AttendanceStorage: Send + Sync {
    async fn create_session(&self, session: Session) -> Result<Session, StorageError>;

    async fn get_session(&self, session_id: &str) -> Result<Option<Session>, StorageError>;

    /// Sets the session status, returning the updated session, or `None` if
    /// the session does not exist.
    async fn update_session_status(
        &self,
        session_id: &str,
        status: SessionStatus,
    ) -> Result<Option<Session>, StorageError>;

    async fn list_sessions(&self) -> Result<Vec<Session>, StorageError>;

    async fn insert_attendance(
        &self,
        record: AttendanceRecord,
    ) -> Result<AttendanceRecord, StorageError>;

    async fn attendance_for_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<AttendanceRecord>, StorageError>;

    async fn get_attendance_record(
        &self,
        record_id: &str,
    ) -> Result<Option<AttendanceRecord>, StorageError>;

    /// Duplicate probe: true when the session already has a record matching
    /// `student_id`, or `device_id` when one is supplied.
    async fn has_attendance(
        &self,
        session_id: &str,
        student_id: &str,
        device_id: Option<&str>,
    ) -> Result<bool, StorageError>;
}
