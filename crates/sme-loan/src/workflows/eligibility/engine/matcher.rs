use tracing::debug;

use super::super::catalog::ProductCatalog;
use super::super::domain::{Product, Scores};

pub const MAX_RECOMMENDED_PRODUCTS: usize = 3;

/// Products whose tax, credit and mortgage thresholds are all met, largest
/// `max_amount` first, capped at three.
///
/// The flow score is not part of eligibility. That asymmetry is the current
/// product rule set; confirm with the business before adding it.
pub fn match_products<'a>(scores: &Scores, catalog: &'a ProductCatalog) -> Vec<&'a Product> {
    let mut matched: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|product| is_eligible(scores, product))
        .collect();

    // Stable: equal amounts keep catalog order.
    matched.sort_by(|a, b| b.max_amount.total_cmp(&a.max_amount));
    matched.truncate(MAX_RECOMMENDED_PRODUCTS);

    debug!(
        products = ?matched.iter().map(|product| product.name.as_str()).collect::<Vec<_>>(),
        "matched products"
    );
    matched
}

fn is_eligible(scores: &Scores, product: &Product) -> bool {
    let requirements = &product.requirements;
    f64::from(scores.tax) >= requirements.min_tax_score
        && f64::from(scores.credit) >= requirements.min_credit_score
        && f64::from(scores.mortgage) >= requirements.min_mortgage_score
}
