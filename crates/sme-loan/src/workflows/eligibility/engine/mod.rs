mod advisor;
mod matcher;
mod range;
mod scoring;

pub use advisor::{advise, weakest_dimension, PlanCode};
pub use matcher::{match_products, MAX_RECOMMENDED_PRODUCTS};
pub use range::{loan_range, LOAN_RANGE_FLOOR};
pub use scoring::score_answers;

use std::sync::Arc;

use super::catalog::ProductCatalog;
use super::domain::Answers;
use super::report::{assemble_report, EligibilityReport};

/// Stateless decision pipeline bound to a read-only product catalog.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    catalog: Arc<ProductCatalog>,
}

impl DecisionEngine {
    pub fn new(catalog: Arc<ProductCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Scores the answers, then derives products, range and plan from the
    /// same scores.
    pub fn assess(&self, answers: &Answers) -> EligibilityReport {
        let scores = score_answers(answers);
        let products = match_products(&scores, &self.catalog);
        let range = loan_range(&scores);
        let plans = advise(&scores);

        assemble_report(scores, range, &products, plans)
    }
}
