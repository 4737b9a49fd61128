use serde::{Deserialize, Serialize, Serializer};

use super::domain::{LoanRange, Product, ReformPlan, Scores};

/// Product as presented to the enterprise, with the rate band pre-formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedProduct {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    #[serde(serialize_with = "serialize_amount")]
    pub max_amount: f64,
    pub interest_rate: String,
}

impl RecommendedProduct {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            product_type: product.product_type.clone(),
            max_amount: product.max_amount,
            interest_rate: format!(
                "{}%-{}%",
                product.interest_rate.min, product.interest_rate.max
            ),
        }
    }
}

/// Whole amounts are written as JSON integers, the way the catalog lists them.
fn serialize_amount<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    // 2^53: beyond this not every integer is representable.
    const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;
    if amount.fract() == 0.0 && amount.abs() < EXACT_INTEGER_LIMIT {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

/// Complete decision output, returned by previews and stored with reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub scores: Scores,
    pub current_loan_range: LoanRange,
    pub recommended_products: Vec<RecommendedProduct>,
    pub reform_plans: Vec<ReformPlan>,
}

pub fn assemble_report(
    scores: Scores,
    range: LoanRange,
    products: &[&Product],
    plans: Vec<ReformPlan>,
) -> EligibilityReport {
    EligibilityReport {
        scores,
        current_loan_range: range,
        recommended_products: products
            .iter()
            .map(|product| RecommendedProduct::from_product(product))
            .collect(),
        reform_plans: plans,
    }
}
