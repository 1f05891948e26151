use std::sync::Arc;

use services::{
    attendance_service::AttendanceService,
    auth_service::{AuthService, OtpMailer},
    export_service::ExportService,
    session_service::SessionService,
};
use storage::{AttendanceStorage, MemoryStorage};

/// Central place for everything the handlers need: the services, all sharing
/// one storage backend, plus the OTP engine.
#[derive(Clone)]
pub struct AppState {
    sessions: Arc<SessionService>,
    attendance: Arc<AttendanceService>,
    exports: Arc<ExportService>,
    auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn AttendanceStorage>,
        mailer: Option<Arc<dyn OtpMailer>>,
    ) -> Self {
        Self {
            sessions: Arc::new(SessionService::new(storage.clone())),
            attendance: Arc::new(AttendanceService::new(storage.clone())),
            exports: Arc::new(ExportService::new(storage)),
            auth: Arc::new(AuthService::new(mailer)),
        }
    }

    /// State backed by the in-memory store, the backend this process ships
    /// with.
    pub fn in_memory(mailer: Option<Arc<dyn OtpMailer>>) -> Self {
        Self::new(Arc::new(MemoryStorage::new()), mailer)
    }

    pub fn sessions(&self) -> &SessionService {
        &self.sessions
    }

    pub fn attendance(&self) -> &AttendanceService {
        &self.attendance
    }

    pub fn exports(&self) -> &ExportService {
        &self.exports
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }
}
