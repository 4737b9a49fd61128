use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDateTime;
use serde_json::{json, Value};

use crate::workflows::eligibility::catalog::ProductCatalog;
use crate::workflows::eligibility::domain::{
    Answers, InterestRate, Product, ProductRequirements, ReportId, SubmissionId,
};
use crate::workflows::eligibility::report::EligibilityReport;
use crate::workflows::eligibility::repository::{
    EligibilityRepository, RepositoryError, ReportRecord, SubmissionRecord,
};
use crate::workflows::eligibility::{
    eligibility_router, EligibilityService, InMemoryEligibilityRepository,
};

pub(super) fn product(name: &str, max_amount: f64, tax: f64, credit: f64, mortgage: f64) -> Product {
    Product {
        name: name.to_string(),
        product_type: "credit".to_string(),
        max_amount,
        interest_rate: InterestRate { min: 3.85, max: 6.5 },
        requirements: ProductRequirements {
            min_tax_score: tax,
            min_credit_score: credit,
            min_mortgage_score: mortgage,
        },
    }
}

pub(super) fn catalog() -> Arc<ProductCatalog> {
    Arc::new(ProductCatalog::new(vec![
        product("Tax Credit Loan", 300.0, 60.0, 80.0, 0.0),
        product("Mortgage Plus", 500.0, 40.0, 60.0, 80.0),
        product("Micro Starter", 50.0, 0.0, 0.0, 0.0),
        product("Invoice Express", 200.0, 50.0, 60.0, 0.0),
        product("Premium Line", 1000.0, 90.0, 100.0, 0.0),
    ]))
}

/// The worked example: tax 60, flow 60, mortgage 0, credit 100.
pub(super) fn answers_json() -> Value {
    json!({
        "annual_invoice": 300,
        "annual_flow": 600,
        "has_mortgage": false,
        "overdue_level": "none"
    })
}

pub(super) fn envelope(answers: Value) -> Value {
    json!({ "answers": answers })
}

pub(super) type MemoryService = EligibilityService<InMemoryEligibilityRepository>;

pub(super) fn build_service() -> (MemoryService, Arc<InMemoryEligibilityRepository>) {
    let repository = Arc::new(InMemoryEligibilityRepository::default());
    let service = EligibilityService::new(repository.clone(), catalog());
    (service, repository)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    eligibility_router(Arc::new(service))
}

pub(super) struct UnavailableRepository;

impl EligibilityRepository for UnavailableRepository {
    fn insert_submission(
        &self,
        _answers: &Answers,
        _created_at: NaiveDateTime,
    ) -> Result<SubmissionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_submission(
        &self,
        _id: SubmissionId,
    ) -> Result<Option<SubmissionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_submissions(&self) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete_submission_cascade(
        &self,
        _id: SubmissionId,
    ) -> Result<Option<usize>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_report(
        &self,
        _submission_id: SubmissionId,
        _report: &EligibilityReport,
        _created_at: NaiveDateTime,
    ) -> Result<ReportRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_report(&self, _id: ReportId) -> Result<Option<ReportRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_reports(&self) -> Result<Vec<ReportRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete_report(&self, _id: ReportId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
