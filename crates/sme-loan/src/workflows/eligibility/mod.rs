//! Loan eligibility assessment: questionnaire scoring, product matching, and
//! the submission/report lifecycle around it.

pub mod catalog;
pub mod domain;
pub mod engine;
pub mod memory;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod storage;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, ProductCatalog};
pub use domain::{
    Answers, Dimension, InterestRate, LoanRange, OverdueLevel, Product, ProductRequirements,
    ReformPlan, ReportId, Scores, Span, SubmissionId,
};
pub use engine::DecisionEngine;
pub use memory::InMemoryEligibilityRepository;
pub use report::{EligibilityReport, RecommendedProduct};
pub use repository::{EligibilityRepository, RepositoryError, ReportRecord, SubmissionRecord};
pub use router::eligibility_router;
pub use service::{EligibilityService, EligibilityServiceError};
pub use storage::SqliteEligibilityRepository;
pub use validation::{AnswersGuard, AnswersViolation};
