use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use serde_json::Value;
use tracing::info;

use super::catalog::ProductCatalog;
use super::domain::{ReportId, SubmissionId};
use super::engine::DecisionEngine;
use super::report::EligibilityReport;
use super::repository::{EligibilityRepository, RepositoryError, ReportRecord, SubmissionRecord};
use super::validation::{AnswersGuard, AnswersViolation};

/// Service composing the answers guard, decision engine, and repository.
pub struct EligibilityService<R> {
    guard: AnswersGuard,
    engine: DecisionEngine,
    repository: Arc<R>,
}

impl<R> EligibilityService<R>
where
    R: EligibilityRepository + 'static,
{
    pub fn new(repository: Arc<R>, catalog: Arc<ProductCatalog>) -> Self {
        Self {
            guard: AnswersGuard,
            engine: DecisionEngine::new(catalog),
            repository,
        }
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Run the pipeline on request answers without persisting anything.
    pub fn preview(&self, payload: &Value) -> Result<EligibilityReport, EligibilityServiceError> {
        let answers = self.guard.validate_lenient(payload)?;
        Ok(self.engine.assess(&answers))
    }

    /// Persist a `{"answers": {...}}` payload.
    pub fn create_submission(
        &self,
        payload: &Value,
    ) -> Result<SubmissionRecord, EligibilityServiceError> {
        let answers = self.guard.validate_envelope(payload)?;
        let record = self.repository.insert_submission(&answers, now())?;
        info!(submission_id = %record.id, "submission saved");
        Ok(record)
    }

    pub fn get_submission(
        &self,
        id: SubmissionId,
    ) -> Result<SubmissionRecord, EligibilityServiceError> {
        self.repository
            .fetch_submission(id)?
            .ok_or(EligibilityServiceError::SubmissionNotFound(id))
    }

    /// Recompute the pipeline from the stored answers and persist a new
    /// report. Each call inserts another row.
    ///
    /// The existence check and the insert are separate units of work; a
    /// submission deleted in between leaves the new report orphaned.
    pub fn generate_report(
        &self,
        submission_id: SubmissionId,
    ) -> Result<ReportRecord, EligibilityServiceError> {
        let submission = self.get_submission(submission_id)?;
        let report = self.engine.assess(&submission.answers);
        let record = self
            .repository
            .insert_report(submission.id, &report, now())?;
        info!(submission_id = %submission.id, report_id = %record.id, "report generated");
        Ok(record)
    }

    pub fn get_report(&self, id: ReportId) -> Result<ReportRecord, EligibilityServiceError> {
        self.repository
            .fetch_report(id)?
            .ok_or(EligibilityServiceError::ReportNotFound(id))
    }

    pub fn list_submissions(&self) -> Result<Vec<SubmissionRecord>, EligibilityServiceError> {
        Ok(self.repository.list_submissions()?)
    }

    pub fn list_reports(&self) -> Result<Vec<ReportRecord>, EligibilityServiceError> {
        Ok(self.repository.list_reports()?)
    }

    /// Delete a submission together with every report referencing it.
    pub fn delete_submission(&self, id: SubmissionId) -> Result<usize, EligibilityServiceError> {
        let removed_reports = self
            .repository
            .delete_submission_cascade(id)?
            .ok_or(EligibilityServiceError::SubmissionNotFound(id))?;
        info!(submission_id = %id, removed_reports, "submission deleted");
        Ok(removed_reports)
    }

    /// Delete one report; its submission is left untouched.
    pub fn delete_report(&self, id: ReportId) -> Result<(), EligibilityServiceError> {
        if !self.repository.delete_report(id)? {
            return Err(EligibilityServiceError::ReportNotFound(id));
        }
        info!(report_id = %id, "report deleted");
        Ok(())
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Error raised by the eligibility service.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityServiceError {
    #[error("invalid answers: {0}")]
    Validation(#[from] AnswersViolation),
    #[error("submission {0} not found")]
    SubmissionNotFound(SubmissionId),
    #[error("report {0} not found")]
    ReportNotFound(ReportId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
