use thiserror::Error;

/// Failures surfaced by a storage backend.
///
/// `Conflict` is returned by the conditional attendance insert when another
/// record already holds one of the duplicate-prevention keys; callers treat
/// it as a business-rule refusal, not an I/O fault.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("attendance already recorded for session {0}")]
    Conflict(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}
