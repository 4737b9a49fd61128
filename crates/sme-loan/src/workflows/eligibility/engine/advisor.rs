use tracing::debug;

use super::super::domain::{Dimension, ReformPlan, Scores, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanCode {
    A,
    B,
    C,
}

impl PlanCode {
    pub const fn letter(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }

    /// Mortgage and credit both map to the qualification plan.
    pub const fn for_dimension(dimension: Dimension) -> Self {
        match dimension {
            Dimension::Tax => Self::A,
            Dimension::Flow => Self::B,
            Dimension::Mortgage | Dimension::Credit => Self::C,
        }
    }

    pub fn plan(self) -> ReformPlan {
        let (name, cost, duration, roi) = match self {
            Self::A => ("invoice-issuance improvement", (8, 15), (4, 7), 900),
            Self::B => ("tax-payment improvement", (5, 10), (3, 6), 600),
            Self::C => ("qualification certification", (10, 20), (6, 12), 1200),
        };

        ReformPlan {
            plan: self.letter().to_string(),
            name: name.to_string(),
            cost: Span {
                min: cost.0,
                max: cost.1,
            },
            duration: Span {
                min: duration.0,
                max: duration.1,
            },
            roi,
        }
    }
}

/// Lowest-scoring dimension; ties resolve in `Dimension::ordered()` order.
pub fn weakest_dimension(scores: &Scores) -> Dimension {
    let ordered = Dimension::ordered();
    let lowest = ordered
        .iter()
        .map(|dimension| scores.get(*dimension))
        .min()
        .unwrap_or_default();

    ordered
        .into_iter()
        .find(|dimension| scores.get(*dimension) == lowest)
        .unwrap_or(Dimension::Tax)
}

/// Single recommended reform plan, returned as a list for the report payload.
pub fn advise(scores: &Scores) -> Vec<ReformPlan> {
    let weakest = weakest_dimension(scores);
    let code = PlanCode::for_dimension(weakest);
    debug!(dimension = weakest.label(), plan = code.letter(), "reform plan selected");
    vec![code.plan()]
}
