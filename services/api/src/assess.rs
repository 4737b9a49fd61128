use clap::Args;
use serde_json::json;
use sme_loan::error::AppError;
use sme_loan::workflows::eligibility::{
    AnswersGuard, DecisionEngine, EligibilityReport, OverdueLevel, ProductCatalog,
};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Annual invoiced amount (same unit as product max amounts)
    #[arg(long)]
    pub(crate) annual_invoice: f64,
    /// Annual bank flow
    #[arg(long)]
    pub(crate) annual_flow: f64,
    /// The enterprise holds mortgageable assets
    #[arg(long)]
    pub(crate) has_mortgage: bool,
    /// Worst overdue history: none, M1, or M3+
    #[arg(long, default_value = "none")]
    pub(crate) overdue_level: String,
    /// Product catalog to match against (defaults to data/products.json)
    #[arg(long)]
    pub(crate) products: Option<PathBuf>,
    /// Print the report payload as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        annual_invoice,
        annual_flow,
        has_mortgage,
        overdue_level,
        products,
        json,
    } = args;

    let payload = json!({
        "annual_invoice": annual_invoice,
        "annual_flow": annual_flow,
        "has_mortgage": has_mortgage,
        "overdue_level": overdue_level,
    });
    let answers = AnswersGuard.validate(&payload)?;

    let catalog_path = products.unwrap_or_else(|| PathBuf::from("data/products.json"));
    let catalog = ProductCatalog::from_path(&catalog_path)?;
    let engine = DecisionEngine::new(Arc::new(catalog));
    let report = engine.assess(&answers);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&answers.overdue_level, &report));
    }
    Ok(())
}

fn render_report(overdue_level: &OverdueLevel, report: &EligibilityReport) -> String {
    let mut out = String::new();
    let scores = &report.scores;

    let _ = writeln!(
        out,
        "Eligibility assessment (overdue history: {})",
        overdue_level.as_str()
    );
    let _ = writeln!(
        out,
        "- Scores: tax {} | flow {} | mortgage {} | credit {} (average {:.1})",
        scores.tax,
        scores.flow,
        scores.mortgage,
        scores.credit,
        scores.average()
    );
    let _ = writeln!(
        out,
        "- Current loan range: {}-{}",
        report.current_loan_range.min, report.current_loan_range.max
    );

    if report.recommended_products.is_empty() {
        let _ = writeln!(out, "- Recommended products: none eligible");
    } else {
        let _ = writeln!(out, "- Recommended products:");
        for product in &report.recommended_products {
            let _ = writeln!(
                out,
                "    - {} ({}): up to {} at {}",
                product.name, product.product_type, product.max_amount, product.interest_rate
            );
        }
    }

    for plan in &report.reform_plans {
        let _ = writeln!(
            out,
            "- Reform plan {}: {} | cost {}-{} | {}-{} months | ROI {}%",
            plan.plan,
            plan.name,
            plan.cost.min,
            plan.cost.max,
            plan.duration.min,
            plan.duration.max,
            plan.roi
        );
    }
    out
}
