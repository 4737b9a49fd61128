use tracing::debug;

use super::super::domain::{Answers, OverdueLevel, Scores};

const INVOICE_FULL_MARKS: f64 = 500.0;
const FLOW_FULL_MARKS: f64 = 1000.0;
const MORTGAGE_SCORE: u8 = 80;
/// Neutral credit for an overdue level that slipped past validation.
const FALLBACK_CREDIT_SCORE: u8 = 50;

pub fn score_answers(answers: &Answers) -> Scores {
    let scores = Scores {
        tax: ratio_score(answers.annual_invoice, INVOICE_FULL_MARKS),
        flow: ratio_score(answers.annual_flow, FLOW_FULL_MARKS),
        mortgage: if answers.has_mortgage {
            MORTGAGE_SCORE
        } else {
            0
        },
        credit: credit_score(&answers.overdue_level),
    };

    debug!(
        tax = scores.tax,
        flow = scores.flow,
        mortgage = scores.mortgage,
        credit = scores.credit,
        "scored answers"
    );
    scores
}

/// `min(100, trunc(value / full_marks * 100))`, clamped at 0 so a value that
/// bypassed validation cannot leave the score range. NaN truncates to 0.
fn ratio_score(value: f64, full_marks: f64) -> u8 {
    let raw = (value / full_marks * 100.0).trunc();
    raw.clamp(0.0, 100.0) as u8
}

fn credit_score(level: &OverdueLevel) -> u8 {
    match level {
        OverdueLevel::None => 100,
        OverdueLevel::M1 => 60,
        OverdueLevel::M3Plus => 0,
        OverdueLevel::Unrecognized(_) => FALLBACK_CREDIT_SCORE,
    }
}
