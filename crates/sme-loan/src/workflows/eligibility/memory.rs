use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDateTime;

use super::domain::{Answers, ReportId, SubmissionId};
use super::report::EligibilityReport;
use super::repository::{EligibilityRepository, RepositoryError, ReportRecord, SubmissionRecord};

#[derive(Default)]
struct Tables {
    submissions: BTreeMap<SubmissionId, SubmissionRecord>,
    reports: BTreeMap<ReportId, ReportRecord>,
    last_submission_id: i64,
    last_report_id: i64,
}

/// Process-local storage, selected with `APP_STORAGE=memory` and used by the
/// workflow tests. Ids are never reused, matching the SQLite AUTOINCREMENT
/// tables.
#[derive(Default, Clone)]
pub struct InMemoryEligibilityRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryEligibilityRepository {
    fn tables(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables.lock().map_err(|_| RepositoryError::Poisoned)
    }
}

impl EligibilityRepository for InMemoryEligibilityRepository {
    fn insert_submission(
        &self,
        answers: &Answers,
        created_at: NaiveDateTime,
    ) -> Result<SubmissionRecord, RepositoryError> {
        let mut tables = self.tables()?;
        tables.last_submission_id += 1;
        let record = SubmissionRecord {
            id: SubmissionId(tables.last_submission_id),
            answers: answers.clone(),
            created_at,
        };
        tables.submissions.insert(record.id, record.clone());
        Ok(record)
    }

    fn fetch_submission(
        &self,
        id: SubmissionId,
    ) -> Result<Option<SubmissionRecord>, RepositoryError> {
        Ok(self.tables()?.submissions.get(&id).cloned())
    }

    fn list_submissions(&self) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        Ok(self.tables()?.submissions.values().cloned().collect())
    }

    fn delete_submission_cascade(
        &self,
        id: SubmissionId,
    ) -> Result<Option<usize>, RepositoryError> {
        let mut tables = self.tables()?;
        if tables.submissions.remove(&id).is_none() {
            return Ok(None);
        }
        let before = tables.reports.len();
        tables.reports.retain(|_, report| report.submission_id != id);
        Ok(Some(before - tables.reports.len()))
    }

    fn insert_report(
        &self,
        submission_id: SubmissionId,
        report: &EligibilityReport,
        created_at: NaiveDateTime,
    ) -> Result<ReportRecord, RepositoryError> {
        let mut tables = self.tables()?;
        tables.last_report_id += 1;
        let record = ReportRecord {
            id: ReportId(tables.last_report_id),
            submission_id,
            report: report.clone(),
            created_at,
        };
        tables.reports.insert(record.id, record.clone());
        Ok(record)
    }

    fn fetch_report(&self, id: ReportId) -> Result<Option<ReportRecord>, RepositoryError> {
        Ok(self.tables()?.reports.get(&id).cloned())
    }

    fn list_reports(&self) -> Result<Vec<ReportRecord>, RepositoryError> {
        Ok(self.tables()?.reports.values().cloned().collect())
    }

    fn delete_report(&self, id: ReportId) -> Result<bool, RepositoryError> {
        Ok(self.tables()?.reports.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::eligibility::catalog::ProductCatalog;
    use crate::workflows::eligibility::domain::OverdueLevel;
    use crate::workflows::eligibility::engine::DecisionEngine;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .expect("valid timestamp")
    }

    fn answers() -> Answers {
        Answers {
            annual_invoice: 120.0,
            annual_flow: 80.0,
            has_mortgage: false,
            overdue_level: OverdueLevel::M3Plus,
        }
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let repository = InMemoryEligibilityRepository::default();
        let first = repository
            .insert_submission(&answers(), timestamp())
            .expect("insert");
        assert_eq!(
            repository
                .delete_submission_cascade(first.id)
                .expect("delete"),
            Some(0)
        );

        let second = repository
            .insert_submission(&answers(), timestamp())
            .expect("insert");
        assert!(second.id > first.id);
    }

    #[test]
    fn cascade_only_touches_matching_reports() {
        let repository = InMemoryEligibilityRepository::default();
        let engine = DecisionEngine::new(Arc::new(ProductCatalog::empty()));
        let report = engine.assess(&answers());

        let doomed = repository
            .insert_submission(&answers(), timestamp())
            .expect("insert");
        let kept = repository
            .insert_submission(&answers(), timestamp())
            .expect("insert");
        repository
            .insert_report(doomed.id, &report, timestamp())
            .expect("report");
        let survivor = repository
            .insert_report(kept.id, &report, timestamp())
            .expect("report");

        assert_eq!(
            repository
                .delete_submission_cascade(doomed.id)
                .expect("delete"),
            Some(1)
        );
        let reports = repository.list_reports().expect("list");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, survivor.id);
        assert_eq!(
            repository
                .delete_submission_cascade(doomed.id)
                .expect("delete"),
            None
        );
    }
}
