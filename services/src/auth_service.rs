//! OTP login: code issuance, single-use verification, role scoping.
//!
//! The store is an explicit keyed abstraction rather than a bare global map
//! so the engine can be handed a fresh one per process and tests can reach
//! in. Entries live at most the configured expiry window; expired ones are
//! reaped lazily (on the next issuance sweep or on the verification that
//! trips over them).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use common::config;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

/// Who a login is for. Students are domain-restricted; teachers are not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Teacher => write!(f, "teacher"),
            Role::Student => write!(f, "student"),
        }
    }
}

/// A pending one-time code for one email address.
#[derive(Debug, Clone, PartialEq)]
pub struct OtpEntry {
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub role: Role,
}

/// Why a conditional consume refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpConsumeError {
    Missing,
    Expired,
    Mismatch,
}

/// Keyed store of pending OTP entries, one per email.
///
/// All mutation happens under a single write lock, so overwrite-on-reissue
/// and the verify path's check-then-delete cannot interleave per key.
#[derive(Default)]
pub struct OtpStore {
    entries: RwLock<HashMap<String, OtpEntry>>,
}

impl OtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the entry, unconditionally replacing any pending one. The
    /// replaced code is permanently invalid from this point.
    pub async fn set(&self, email: &str, entry: OtpEntry) {
        self.entries.write().await.insert(email.to_owned(), entry);
    }

    pub async fn get(&self, email: &str) -> Option<OtpEntry> {
        self.entries.read().await.get(email).cloned()
    }

    pub async fn remove(&self, email: &str) -> Option<OtpEntry> {
        self.entries.write().await.remove(email)
    }

    /// Single-use redemption: removes and returns the entry only when the
    /// submitted code matches and the entry is still live. An expired entry
    /// is deleted on the spot; a mismatched code leaves it in place so the
    /// user may retry.
    pub async fn consume_if(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<OtpEntry, OtpConsumeError> {
        let mut entries = self.entries.write().await;

        let entry = entries.get(email).ok_or(OtpConsumeError::Missing)?;

        if now > entry.expires_at {
            entries.remove(email);
            return Err(OtpConsumeError::Expired);
        }

        if entry.code != code {
            return Err(OtpConsumeError::Mismatch);
        }

        let entry = entry.clone();
        entries.remove(email);
        Ok(entry)
    }

    /// Drops every entry past its expiry. Returns how many were dropped.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| now <= entry.expires_at);
        before - entries.len()
    }
}

/// Delivery collaborator: gets the code to the address, or fails.
#[async_trait]
pub trait OtpMailer: Send + Sync {
    async fn send_otp(&self, to: &str, code: &str) -> Result<(), MailerError>;
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct MailerError(pub String);

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Students must use an {0} email address")]
    DomainRestricted(String),

    #[error("No OTP requested for this email")]
    NoOtpRequested,

    #[error("OTP has expired")]
    OtpExpired,

    #[error("Invalid OTP code")]
    InvalidOtp,

    #[error("Failed to send OTP email")]
    EmailDelivery(#[source] MailerError),
}

/// Successful verification result, echoed back to the caller alongside the
/// issued token.
#[derive(Debug, Clone)]
pub struct VerifiedOtp {
    pub email: String,
    pub role: Role,
}

pub struct AuthService {
    store: OtpStore,
    mailer: Option<Arc<dyn OtpMailer>>,
}

impl AuthService {
    /// `mailer: None` means no transport is configured; issued codes are
    /// logged for the operator instead of emailed. That fallback exists for
    /// unconfigured environments, it is not a security boundary.
    pub fn new(mailer: Option<Arc<dyn OtpMailer>>) -> Self {
        Self {
            store: OtpStore::new(),
            mailer,
        }
    }

    pub fn store(&self) -> &OtpStore {
        &self.store
    }

    /// Issues a fresh code for the email, invalidating any pending one.
    ///
    /// The entry is stored before delivery is attempted and is NOT rolled
    /// back when delivery fails; the caller sees the failure but the code
    /// remains redeemable.
    pub async fn request_otp(&self, email: &str, role: Role) -> Result<(), AuthError> {
        if role == Role::Student {
            let domain = config::student_email_domain();
            if !email.ends_with(&domain) {
                return Err(AuthError::DomainRestricted(domain));
            }
        }

        let now = Utc::now();
        let swept = self.store.purge_expired(now).await;
        if swept > 0 {
            tracing::debug!(swept, "reaped expired OTP entries");
        }

        let code = generate_code();
        let entry = OtpEntry {
            code: code.clone(),
            expires_at: now + Duration::minutes(config::otp_expiry_minutes()),
            role,
        };
        self.store.set(email, entry).await;

        match &self.mailer {
            Some(mailer) => {
                if let Err(err) = mailer.send_otp(email, &code).await {
                    tracing::error!(email, error = %err, "OTP email delivery failed");
                    return Err(AuthError::EmailDelivery(err));
                }
                tracing::info!(email, %role, "OTP issued and emailed");
            }
            None => {
                tracing::warn!(email, %code, "email transport not configured, logging OTP");
            }
        }

        Ok(())
    }

    /// Redeems a code exactly once. `now` is passed in by the caller, which
    /// keeps expiry decisions testable.
    pub async fn verify_otp(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifiedOtp, AuthError> {
        match self.store.consume_if(email, code, now).await {
            Ok(entry) => Ok(VerifiedOtp {
                email: email.to_owned(),
                role: entry.role,
            }),
            Err(OtpConsumeError::Missing) => Err(AuthError::NoOtpRequested),
            Err(OtpConsumeError::Expired) => Err(AuthError::OtpExpired),
            Err(OtpConsumeError::Mismatch) => {
                // No lockout on repeated misses; at least leave a trail.
                tracing::warn!(email, "OTP verification failed: wrong code");
                Err(AuthError::InvalidOtp)
            }
        }
    }
}

/// Uniformly random 6-digit code, 100000–999999 inclusive.
fn generate_code() -> String {
    thread_rng().gen_range(100_000..=999_999).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(None)
    }

    struct FailingMailer;

    #[async_trait]
    impl OtpMailer for FailingMailer {
        async fn send_otp(&self, _to: &str, _code: &str) -> Result<(), MailerError> {
            Err(MailerError("smtp connection refused".into()))
        }
    }

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..200 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            let n: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&n));
        }
    }

    #[tokio::test]
    async fn round_trip_succeeds_exactly_once() {
        let svc = service();
        svc.request_otp("asha@mnit.ac.in", Role::Student)
            .await
            .unwrap();

        let entry = svc.store().get("asha@mnit.ac.in").await.unwrap();
        let verified = svc
            .verify_otp("asha@mnit.ac.in", &entry.code, Utc::now())
            .await
            .unwrap();
        assert_eq!(verified.email, "asha@mnit.ac.in");
        assert_eq!(verified.role, Role::Student);

        // second redemption of the same code: entry is gone
        let err = svc
            .verify_otp("asha@mnit.ac.in", &entry.code, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NoOtpRequested));
    }

    #[tokio::test]
    async fn verify_without_request_fails() {
        let svc = service();
        let err = svc
            .verify_otp("nobody@mnit.ac.in", "123456", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NoOtpRequested));
    }

    #[tokio::test]
    async fn wrong_code_fails_but_entry_survives() {
        let svc = service();
        svc.request_otp("asha@mnit.ac.in", Role::Student)
            .await
            .unwrap();
        let entry = svc.store().get("asha@mnit.ac.in").await.unwrap();
        let wrong = if entry.code == "111111" { "222222" } else { "111111" };

        let err = svc
            .verify_otp("asha@mnit.ac.in", wrong, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidOtp));

        // the right code still works afterwards
        svc.verify_otp("asha@mnit.ac.in", &entry.code, Utc::now())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn expired_code_fails_and_is_deleted() {
        let svc = service();
        svc.store()
            .set(
                "asha@mnit.ac.in",
                OtpEntry {
                    code: "123456".into(),
                    expires_at: Utc::now() - Duration::seconds(1),
                    role: Role::Student,
                },
            )
            .await;

        let err = svc
            .verify_otp("asha@mnit.ac.in", "123456", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::OtpExpired));
        assert!(svc.store().get("asha@mnit.ac.in").await.is_none());
    }

    #[tokio::test]
    async fn expiry_window_is_five_minutes() {
        let svc = service();
        svc.request_otp("asha@mnit.ac.in", Role::Student)
            .await
            .unwrap();
        let entry = svc.store().get("asha@mnit.ac.in").await.unwrap();

        // one second past the window fails, regardless of code correctness
        let late = entry.expires_at + Duration::seconds(1);
        let err = svc
            .verify_otp("asha@mnit.ac.in", &entry.code, late)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::OtpExpired));
    }

    #[tokio::test]
    async fn reissue_invalidates_previous_code() {
        let svc = service();
        svc.request_otp("asha@mnit.ac.in", Role::Student)
            .await
            .unwrap();
        let first = svc.store().get("asha@mnit.ac.in").await.unwrap();

        svc.request_otp("asha@mnit.ac.in", Role::Student)
            .await
            .unwrap();
        let second = svc.store().get("asha@mnit.ac.in").await.unwrap();

        if first.code != second.code {
            let err = svc
                .verify_otp("asha@mnit.ac.in", &first.code, Utc::now())
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::InvalidOtp));
        }
        svc.verify_otp("asha@mnit.ac.in", &second.code, Utc::now())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn student_domain_is_enforced_but_teacher_is_not() {
        let svc = service();

        let err = svc
            .request_otp("asha@gmail.com", Role::Student)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DomainRestricted(_)));
        assert!(err.to_string().contains("@mnit.ac.in"));
        assert!(svc.store().get("asha@gmail.com").await.is_none());

        svc.request_otp("prof@gmail.com", Role::Teacher)
            .await
            .unwrap();
        assert!(svc.store().get("prof@gmail.com").await.is_some());
    }

    #[tokio::test]
    async fn delivery_failure_keeps_entry_usable() {
        let svc = AuthService::new(Some(Arc::new(FailingMailer)));

        let err = svc
            .request_otp("prof@uni.edu", Role::Teacher)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailDelivery(_)));

        // stored before the send attempt, not rolled back after it
        let entry = svc.store().get("prof@uni.edu").await.unwrap();
        svc.verify_otp("prof@uni.edu", &entry.code, Utc::now())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn purge_drops_only_expired_entries() {
        let store = OtpStore::new();
        let now = Utc::now();
        store
            .set(
                "old@mnit.ac.in",
                OtpEntry {
                    code: "111111".into(),
                    expires_at: now - Duration::minutes(1),
                    role: Role::Student,
                },
            )
            .await;
        store
            .set(
                "fresh@mnit.ac.in",
                OtpEntry {
                    code: "222222".into(),
                    expires_at: now + Duration::minutes(5),
                    role: Role::Student,
                },
            )
            .await;

        assert_eq!(store.purge_expired(now).await, 1);
        assert!(store.get("old@mnit.ac.in").await.is_none());
        assert!(store.get("fresh@mnit.ac.in").await.is_some());
    }
}
