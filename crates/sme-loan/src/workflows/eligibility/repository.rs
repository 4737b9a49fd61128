use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::domain::{Answers, ReportId, SubmissionId};
use super::report::EligibilityReport;

/// Stored questionnaire answers. Never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub answers: Answers,
    pub created_at: NaiveDateTime,
}

/// Stored decision snapshot. `submission_id` is a lookup reference only and
/// may dangle once the submission is gone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: ReportId,
    pub submission_id: SubmissionId,
    #[serde(rename = "report_json")]
    pub report: EligibilityReport,
    pub created_at: NaiveDateTime,
}

/// Storage abstraction so the service can be exercised in isolation. Every
/// method is a single atomic unit of work.
pub trait EligibilityRepository: Send + Sync {
    fn insert_submission(
        &self,
        answers: &Answers,
        created_at: NaiveDateTime,
    ) -> Result<SubmissionRecord, RepositoryError>;
    fn fetch_submission(&self, id: SubmissionId)
        -> Result<Option<SubmissionRecord>, RepositoryError>;
    fn list_submissions(&self) -> Result<Vec<SubmissionRecord>, RepositoryError>;
    /// Removes every report referencing the submission, then the submission.
    /// Returns the number of reports removed, or `None` when the submission
    /// does not exist (nothing is touched in that case).
    fn delete_submission_cascade(&self, id: SubmissionId)
        -> Result<Option<usize>, RepositoryError>;

    fn insert_report(
        &self,
        submission_id: SubmissionId,
        report: &EligibilityReport,
        created_at: NaiveDateTime,
    ) -> Result<ReportRecord, RepositoryError>;
    fn fetch_report(&self, id: ReportId) -> Result<Option<ReportRecord>, RepositoryError>;
    fn list_reports(&self) -> Result<Vec<ReportRecord>, RepositoryError>;
    /// Returns `false` when no report had that id.
    fn delete_report(&self, id: ReportId) -> Result<bool, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("stored payload could not be decoded: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("repository lock poisoned")]
    Poisoned,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
