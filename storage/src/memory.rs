//! In-memory storage backend.
//!
//! Plain maps behind `tokio::sync::RwLock`s. Good for a single process; state
//! does not survive a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::models::{AttendanceRecord, Session, SessionStatus};
use crate::repository::AttendanceStorage;

#[derive(Default)]
pub struct MemoryStorage {
    sessions: RwLock<HashMap<String, Session>>,
    records: RwLock<HashMap<String, AttendanceRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendanceStorage for MemoryStorage {
    async fn create_session(&self, session: Session) -> Result<Session, StorageError> {
        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session.clone());
        Ok(session)
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<Session>, StorageError> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn update_session_status(
        &self,
        session_id: &str,
        status: SessionStatus,
    ) -> Result<Option<Session>, StorageError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.get_mut(session_id).map(|session| {
            session.status = status;
            session.clone()
        }))
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, StorageError> {
        let mut sessions: Vec<Session> = self.sessions.read().await.values().cloned().collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }

    async fn insert_attendance(
        &self,
        record: AttendanceRecord,
    ) -> Result<AttendanceRecord, StorageError> {
        // Duplicate keys are re-checked under the write lock so two racing
        // submissions cannot both pass the probe and both insert.
        let mut records = self.records.write().await;
        let duplicate = records.values().any(|r| {
            r.session_id == record.session_id
                && (r.student_id == record.student_id || r.device_id == record.device_id)
        });
        if duplicate {
            return Err(StorageError::Conflict(record.session_id));
        }
        records.insert(record.record_id.clone(), record.clone());
        Ok(record)
    }

    async fn attendance_for_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<AttendanceRecord>, StorageError> {
        let mut records: Vec<AttendanceRecord> = self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.marked_at.cmp(&b.marked_at));
        Ok(records)
    }

    async fn get_attendance_record(
        &self,
        record_id: &str,
    ) -> Result<Option<AttendanceRecord>, StorageError> {
        Ok(self.records.read().await.get(record_id).cloned())
    }

    async fn has_attendance(
        &self,
        session_id: &str,
        student_id: &str,
        device_id: Option<&str>,
    ) -> Result<bool, StorageError> {
        Ok(self.records.read().await.values().any(|r| {
            r.session_id == session_id
                && (r.student_id == student_id || device_id.is_some_and(|d| r.device_id == d))
        }))
    }
}
