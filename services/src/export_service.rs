//! Attendance exports: CSV download and the JSON summary.

use std::sync::Arc;

use chrono::SecondsFormat;
use serde::Serialize;
use storage::{AttendanceStorage, models::Session};

use crate::attendance_service::AttendanceError;

/// A rendered CSV export plus the filename to serve it under.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub csv: String,
    pub record_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStudent {
    pub student_id: String,
    pub student_name: String,
    pub marked_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub session_id: String,
    pub subject: String,
    pub faculty_name: String,
    pub created_at: String,
    pub status: storage::models::SessionStatus,
    pub total_attendance: usize,
    pub students: Vec<SummaryStudent>,
}

pub struct ExportService {
    storage: Arc<dyn AttendanceStorage>,
}

impl ExportService {
    pub fn new(storage: Arc<dyn AttendanceStorage>) -> Self {
        Self { storage }
    }

    /// Renders the session's records as a CSV attachment.
    ///
    /// A session with no records exports as the column header alone; a
    /// populated one is prefixed with a session info block.
    pub async fn export_csv(&self, session_id: &str) -> Result<CsvExport, AttendanceError> {
        let session = self
            .storage
            .get_session(session_id)
            .await
            .map_err(AttendanceError::from)?
            .ok_or(AttendanceError::SessionNotFound)?;

        let records = self
            .storage
            .attendance_for_session(session_id)
            .await
            .map_err(AttendanceError::from)?;

        const COLUMNS: &str = "No,Student ID,Student Name,Marked At,Distance (m)\n";

        let csv = if records.is_empty() {
            COLUMNS.to_string()
        } else {
            let mut csv = format!(
                "Session: {}\nFaculty: {}\nDate: {}\nTotal Students: {}\n\n\n",
                session.subject,
                session.faculty_name,
                session
                    .created_at
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
                records.len()
            );
            csv.push_str(COLUMNS);
            for (idx, r) in records.iter().enumerate() {
                let row = format!(
                    "{},{},{},{},{}\n",
                    idx + 1,
                    esc(&r.student_id),
                    esc(&r.student_name),
                    esc(&r.marked_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
                    r.distance
                );
                csv.push_str(&row);
            }
            csv
        };

        Ok(CsvExport {
            filename: export_filename(&session),
            csv,
            record_count: records.len(),
        })
    }

    pub async fn summary(&self, session_id: &str) -> Result<AttendanceSummary, AttendanceError> {
        let session = self
            .storage
            .get_session(session_id)
            .await
            .map_err(AttendanceError::from)?
            .ok_or(AttendanceError::SessionNotFound)?;

        let records = self
            .storage
            .attendance_for_session(session_id)
            .await
            .map_err(AttendanceError::from)?;

        Ok(AttendanceSummary {
            session_id: session.session_id,
            subject: session.subject,
            faculty_name: session.faculty_name,
            created_at: session.created_at.to_rfc3339(),
            status: session.status,
            total_attendance: records.len(),
            students: records
                .into_iter()
                .map(|r| SummaryStudent {
                    student_id: r.student_id,
                    student_name: r.student_name,
                    marked_at: r.marked_at.to_rfc3339(),
                })
                .collect(),
        })
    }
}

/// `attendance_<subject-slug>_<yyyy-mm-dd>.csv`
fn export_filename(session: &Session) -> String {
    let slug: String = session
        .subject
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!(
        "attendance_{}_{}.csv",
        slug,
        session.created_at.format("%Y-%m-%d")
    )
}

fn esc(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::{MemoryStorage, models::AttendanceRecord};

    async fn seeded() -> (ExportService, Session, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let session = storage
            .create_session(Session::new(
                "Dr. Rao",
                "rao@mnit.ac.in",
                "Data Structures & Algorithms",
                26.9124,
                75.7873,
                50,
            ))
            .await
            .unwrap();
        (ExportService::new(storage.clone()), session, storage)
    }

    fn record(session_id: &str, student_id: &str, name: &str, device: &str) -> AttendanceRecord {
        AttendanceRecord::new(
            session_id,
            student_id,
            name,
            "student@mnit.ac.in",
            device,
            26.9124,
            75.7874,
            9,
        )
    }

    #[tokio::test]
    async fn empty_session_exports_header_only() {
        let (svc, session, _) = seeded().await;
        let export = svc.export_csv(&session.session_id).await.unwrap();

        assert_eq!(export.record_count, 0);
        assert_eq!(export.csv, "No,Student ID,Student Name,Marked At,Distance (m)\n");
    }

    #[tokio::test]
    async fn populated_export_has_info_block_and_rows() {
        let (svc, session, storage) = seeded().await;
        storage
            .insert_attendance(record(&session.session_id, "2023UCP1234", "Asha Verma", "dev-a"))
            .await
            .unwrap();
        storage
            .insert_attendance(record(&session.session_id, "2023UCP5678", "Ravi Singh", "dev-b"))
            .await
            .unwrap();

        let export = svc.export_csv(&session.session_id).await.unwrap();
        assert_eq!(export.record_count, 2);
        assert!(export.csv.starts_with("Session: Data Structures & Algorithms\n"));
        assert!(export.csv.contains("Faculty: Dr. Rao\n"));
        assert!(export.csv.contains("Total Students: 2\n"));
        assert!(export.csv.contains("1,2023UCP1234,Asha Verma,"));
        assert!(export.csv.contains("2,2023UCP5678,Ravi Singh,"));
        assert!(export.csv.trim_end().ends_with(",9"));
    }

    #[tokio::test]
    async fn fields_with_commas_and_quotes_are_escaped() {
        let (svc, session, storage) = seeded().await;
        storage
            .insert_attendance(record(
                &session.session_id,
                "2023UCP1234",
                "Verma, Asha \"AV\"",
                "dev-a",
            ))
            .await
            .unwrap();

        let export = svc.export_csv(&session.session_id).await.unwrap();
        assert!(export.csv.contains("\"Verma, Asha \"\"AV\"\"\""));
    }

    #[tokio::test]
    async fn filename_slugs_subject_and_stamps_date() {
        let (svc, session, _) = seeded().await;
        let export = svc.export_csv(&session.session_id).await.unwrap();

        let date = session.created_at.format("%Y-%m-%d").to_string();
        assert_eq!(
            export.filename,
            format!("attendance_data_structures___algorithms_{date}.csv")
        );
    }

    #[tokio::test]
    async fn summary_lists_students() {
        let (svc, session, storage) = seeded().await;
        storage
            .insert_attendance(record(&session.session_id, "2023UCP1234", "Asha Verma", "dev-a"))
            .await
            .unwrap();

        let summary = svc.summary(&session.session_id).await.unwrap();
        assert_eq!(summary.session_id, session.session_id);
        assert_eq!(summary.total_attendance, 1);
        assert_eq!(summary.students.len(), 1);
        assert_eq!(summary.students[0].student_id, "2023UCP1234");
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let (svc, _, _) = seeded().await;
        assert!(matches!(
            svc.export_csv("nope").await.unwrap_err(),
            AttendanceError::SessionNotFound
        ));
        assert!(matches!(
            svc.summary("nope").await.unwrap_err(),
            AttendanceError::SessionNotFound
        ));
    }
}
