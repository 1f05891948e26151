use std::sync::Arc;

use common::config;
use storage::{
    AttendanceStorage, StorageError,
    models::{Session, SessionStatus},
};

/// Parameters for creating an attendance session.
///
/// `faculty_email` comes from the authenticated token, never from the request
/// body; it is what ownership checks compare against later.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub faculty_name: String,
    pub faculty_email: String,
    pub subject: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: Option<i32>,
}

pub struct SessionService {
    storage: Arc<dyn AttendanceStorage>,
}

impl SessionService {
    pub fn new(storage: Arc<dyn AttendanceStorage>) -> Self {
        Self { storage }
    }

    pub async fn create_session(&self, params: CreateSession) -> Result<Session, StorageError> {
        let radius = params
            .radius
            .filter(|r| *r > 0)
            .unwrap_or_else(config::default_radius_meters);

        let session = Session::new(
            params.faculty_name,
            params.faculty_email,
            params.subject,
            params.latitude,
            params.longitude,
            radius,
        );

        let session = self.storage.create_session(session).await?;
        tracing::info!(
            session_id = %session.session_id,
            subject = %session.subject,
            radius_m = session.radius,
            "attendance session created"
        );
        Ok(session)
    }

    pub async fn get_session(&self, session_id: &str) -> Result<Option<Session>, StorageError> {
        self.storage.get_session(session_id).await
    }

    pub async fn list_sessions(&self) -> Result<Vec<Session>, StorageError> {
        self.storage.list_sessions().await
    }

    /// Transitions the session to closed. Closing an already-closed session
    /// is a no-op that returns the session unchanged.
    pub async fn close_session(&self, session_id: &str) -> Result<Option<Session>, StorageError> {
        let closed = self
            .storage
            .update_session_status(session_id, SessionStatus::Closed)
            .await?;
        if let Some(session) = &closed {
            tracing::info!(
                session_id = %session.session_id,
                status = %session.status,
                "attendance session closed"
            );
        }
        Ok(closed)
    }

    pub async fn is_session_active(&self, session_id: &str) -> Result<bool, StorageError> {
        Ok(self
            .storage
            .get_session(session_id)
            .await?
            .is_some_and(|s| s.is_active()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::MemoryStorage;

    fn service() -> SessionService {
        SessionService::new(Arc::new(MemoryStorage::new()))
    }

    fn params(radius: Option<i32>) -> CreateSession {
        CreateSession {
            faculty_name: "Dr. Rao".into(),
            faculty_email: "rao@mnit.ac.in".into(),
            subject: "Data Structures".into(),
            latitude: 26.9124,
            longitude: 75.7873,
            radius,
        }
    }

    #[tokio::test]
    async fn creates_active_session_with_explicit_radius() {
        let svc = service();
        let session = svc.create_session(params(Some(75))).await.unwrap();

        assert_eq!(session.radius, 75);
        assert_eq!(session.status, SessionStatus::Active);
        assert!(svc.is_session_active(&session.session_id).await.unwrap());
    }

    #[tokio::test]
    async fn missing_or_invalid_radius_falls_back_to_default() {
        let svc = service();
        let default = common::config::default_radius_meters();

        let omitted = svc.create_session(params(None)).await.unwrap();
        assert_eq!(omitted.radius, default);

        let zero = svc.create_session(params(Some(0))).await.unwrap();
        assert_eq!(zero.radius, default);
    }

    #[tokio::test]
    async fn close_is_irreversible_and_idempotent() {
        let svc = service();
        let session = svc.create_session(params(None)).await.unwrap();

        let closed = svc
            .close_session(&session.session_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(closed.status, SessionStatus::Closed);
        assert!(!svc.is_session_active(&session.session_id).await.unwrap());

        let again = svc
            .close_session(&session.session_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(again.status, SessionStatus::Closed);
    }

    #[tokio::test]
    async fn close_of_unknown_session_returns_none() {
        let svc = service();
        assert!(svc.close_session("nope").await.unwrap().is_none());
    }
}
