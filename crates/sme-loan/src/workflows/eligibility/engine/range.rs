use super::super::domain::{LoanRange, Scores};

pub const LOAN_RANGE_FLOOR: u32 = 50;

/// Borrowing range tiered on the mean of the four dimension scores. Boundary
/// averages belong to the higher tier.
pub fn loan_range(scores: &Scores) -> LoanRange {
    let average = scores.average();
    let max = if average >= 80.0 {
        500
    } else if average >= 60.0 {
        350
    } else if average >= 40.0 {
        200
    } else {
        100
    };

    LoanRange {
        min: LOAN_RANGE_FLOOR,
        max,
    }
}
