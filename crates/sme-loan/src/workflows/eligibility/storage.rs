use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::domain::{Answers, ReportId, SubmissionId};
use super::report::EligibilityReport;
use super::repository::{EligibilityRepository, RepositoryError, ReportRecord, SubmissionRecord};
use crate::db;

/// SQLite-backed repository. Answers and report payloads are stored as JSON
/// text columns.
#[derive(Clone)]
pub struct SqliteEligibilityRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteEligibilityRepository {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let conn = db::open_sqlite_connection(path)?;
        Ok(Self::from_connection(conn))
    }

    pub fn in_memory() -> Result<Self, RepositoryError> {
        let conn = db::open_in_memory_connection()?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, RepositoryError> {
        self.conn.lock().map_err(|_| RepositoryError::Poisoned)
    }
}

struct SubmissionRow {
    id: i64,
    answers: String,
    created_at: NaiveDateTime,
}

impl SubmissionRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            answers: row.get(1)?,
            created_at: row.get(2)?,
        })
    }

    fn decode(self) -> Result<SubmissionRecord, RepositoryError> {
        Ok(SubmissionRecord {
            id: SubmissionId(self.id),
            answers: serde_json::from_str(&self.answers)?,
            created_at: self.created_at,
        })
    }
}

struct ReportRow {
    id: i64,
    submission_id: i64,
    report_json: String,
    created_at: NaiveDateTime,
}

impl ReportRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            submission_id: row.get(1)?,
            report_json: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    fn decode(self) -> Result<ReportRecord, RepositoryError> {
        Ok(ReportRecord {
            id: ReportId(self.id),
            submission_id: SubmissionId(self.submission_id),
            report: serde_json::from_str(&self.report_json)?,
            created_at: self.created_at,
        })
    }
}

impl EligibilityRepository for SqliteEligibilityRepository {
    fn insert_submission(
        &self,
        answers: &Answers,
        created_at: NaiveDateTime,
    ) -> Result<SubmissionRecord, RepositoryError> {
        let payload = serde_json::to_string(answers)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO submission (answers, created_at) VALUES (?1, ?2)",
            params![payload, created_at],
        )?;

        Ok(SubmissionRecord {
            id: SubmissionId(conn.last_insert_rowid()),
            answers: answers.clone(),
            created_at,
        })
    }

    fn fetch_submission(
        &self,
        id: SubmissionId,
    ) -> Result<Option<SubmissionRecord>, RepositoryError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, answers, created_at FROM submission WHERE id = ?1",
                params![id.0],
                SubmissionRow::from_row,
            )
            .optional()?;
        row.map(SubmissionRow::decode).transpose()
    }

    fn list_submissions(&self) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, answers, created_at FROM submission ORDER BY id")?;
        let rows = stmt
            .query_map([], SubmissionRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(SubmissionRow::decode).collect()
    }

    fn delete_submission_cascade(
        &self,
        id: SubmissionId,
    ) -> Result<Option<usize>, RepositoryError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let exists = tx
            .query_row(
                "SELECT 1 FROM submission WHERE id = ?1",
                params![id.0],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let removed_reports =
            tx.execute("DELETE FROM report WHERE submission_id = ?1", params![id.0])?;
        tx.execute("DELETE FROM submission WHERE id = ?1", params![id.0])?;
        tx.commit()?;

        Ok(Some(removed_reports))
    }

    fn insert_report(
        &self,
        submission_id: SubmissionId,
        report: &EligibilityReport,
        created_at: NaiveDateTime,
    ) -> Result<ReportRecord, RepositoryError> {
        let payload = serde_json::to_string(report)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO report (submission_id, report_json, created_at) VALUES (?1, ?2, ?3)",
            params![submission_id.0, payload, created_at],
        )?;

        Ok(ReportRecord {
            id: ReportId(conn.last_insert_rowid()),
            submission_id,
            report: report.clone(),
            created_at,
        })
    }

    fn fetch_report(&self, id: ReportId) -> Result<Option<ReportRecord>, RepositoryError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, submission_id, report_json, created_at FROM report WHERE id = ?1",
                params![id.0],
                ReportRow::from_row,
            )
            .optional()?;
        row.map(ReportRow::decode).transpose()
    }

    fn list_reports(&self) -> Result<Vec<ReportRecord>, RepositoryError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT id, submission_id, report_json, created_at FROM report ORDER BY id")?;
        let rows = stmt
            .query_map([], ReportRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(ReportRow::decode).collect()
    }

    fn delete_report(&self, id: ReportId) -> Result<bool, RepositoryError> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM report WHERE id = ?1", params![id.0])?;
        Ok(removed > 0)
    }
}
