use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a persisted questionnaire submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub i64);

/// Identifier of a persisted report snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub i64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payment-overdue history reported by the enterprise.
///
/// `Unrecognized` keeps whatever string was stored when a value bypassed the
/// answers guard; scoring treats it with a neutral credit score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OverdueLevel {
    None,
    M1,
    M3Plus,
    Unrecognized(String),
}

impl OverdueLevel {
    pub const ACCEPTED: [&'static str; 3] = ["none", "M1", "M3+"];

    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::M1 => "M1",
            Self::M3Plus => "M3+",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for OverdueLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "none" => Self::None,
            "M1" => Self::M1,
            "M3+" => Self::M3Plus,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<OverdueLevel> for String {
    fn from(value: OverdueLevel) -> Self {
        match value {
            OverdueLevel::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

/// Questionnaire answers. Callers validate through `AnswersGuard` before
/// handing these to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answers {
    pub annual_invoice: f64,
    pub annual_flow: f64,
    pub has_mortgage: bool,
    pub overdue_level: OverdueLevel,
}

/// One of the four scored eligibility dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Tax,
    Flow,
    Mortgage,
    Credit,
}

impl Dimension {
    /// Fixed priority order used wherever dimensions must be ranked.
    pub const fn ordered() -> [Self; 4] {
        [Self::Tax, Self::Flow, Self::Mortgage, Self::Credit]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tax => "tax",
            Self::Flow => "flow",
            Self::Mortgage => "mortgage",
            Self::Credit => "credit",
        }
    }
}

/// Normalized dimension scores, each within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub tax: u8,
    pub flow: u8,
    pub mortgage: u8,
    pub credit: u8,
}

impl Scores {
    pub const fn get(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::Tax => self.tax,
            Dimension::Flow => self.flow,
            Dimension::Mortgage => self.mortgage,
            Dimension::Credit => self.credit,
        }
    }

    pub fn average(&self) -> f64 {
        let total: u32 = Dimension::ordered()
            .into_iter()
            .map(|dimension| u32::from(self.get(dimension)))
            .sum();
        f64::from(total) / Dimension::ordered().len() as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestRate {
    pub min: f64,
    pub max: f64,
}

/// Minimum scores a product demands. Thresholds absent from the catalog are 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRequirements {
    pub min_tax_score: f64,
    pub min_credit_score: f64,
    pub min_mortgage_score: f64,
}

/// Loan product as described by the catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub max_amount: f64,
    pub interest_rate: InterestRate,
    #[serde(default)]
    pub requirements: ProductRequirements,
}

/// Borrowing range in the catalog's amount unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub min: u32,
    pub max: u32,
}

/// Remediation package recommended for the weakest dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReformPlan {
    pub plan: String,
    pub name: String,
    pub cost: Span,
    pub duration: Span,
    pub roi: u32,
}

