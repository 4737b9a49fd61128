use serde_json::{Map, Value};

use super::domain::{Answers, OverdueLevel};

/// Reasons a questionnaire payload is rejected before it reaches the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnswersViolation {
    #[error("answers must be a JSON object")]
    NotAnObject,
    #[error("request body must contain an 'answers' field")]
    MissingAnswers,
    #[error("{0} - field required")]
    MissingField(&'static str),
    #[error("{field} - expected {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("{field} - value must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error(
        "overdue_level - must be one of {}, got '{0}'",
        OverdueLevel::ACCEPTED.join(", ")
    )]
    UnknownOverdueLevel(String),
}

/// Boundary validator turning raw JSON into `Answers`. Fields are checked in
/// schema order and the first violation is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnswersGuard;

impl AnswersGuard {
    pub fn validate(&self, payload: &Value) -> Result<Answers, AnswersViolation> {
        let fields = payload.as_object().ok_or(AnswersViolation::NotAnObject)?;

        let annual_invoice = non_negative(fields, "annual_invoice")?;
        let annual_flow = non_negative(fields, "annual_flow")?;
        let has_mortgage = require(fields, "has_mortgage")?
            .as_bool()
            .ok_or(AnswersViolation::WrongType {
                field: "has_mortgage",
                expected: "a boolean",
            })?;

        let raw_level = require(fields, "overdue_level")?
            .as_str()
            .ok_or(AnswersViolation::WrongType {
                field: "overdue_level",
                expected: "a string",
            })?;
        let overdue_level = OverdueLevel::from(raw_level.to_string());
        if !overdue_level.is_recognized() {
            return Err(AnswersViolation::UnknownOverdueLevel(raw_level.to_string()));
        }

        Ok(Answers {
            annual_invoice,
            annual_flow,
            has_mortgage,
            overdue_level,
        })
    }

    /// Validates a `{"answers": {...}}` envelope.
    pub fn validate_envelope(&self, payload: &Value) -> Result<Answers, AnswersViolation> {
        let envelope = payload.as_object().ok_or(AnswersViolation::NotAnObject)?;
        let answers = envelope
            .get("answers")
            .ok_or(AnswersViolation::MissingAnswers)?;
        self.validate(answers)
    }

    /// Accepts either an envelope or bare answers, as the preview endpoint does.
    pub fn validate_lenient(&self, payload: &Value) -> Result<Answers, AnswersViolation> {
        match payload.get("answers") {
            Some(answers) => self.validate(answers),
            None => self.validate(payload),
        }
    }
}

fn require<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, AnswersViolation> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(AnswersViolation::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn non_negative(fields: &Map<String, Value>, field: &'static str) -> Result<f64, AnswersViolation> {
    let value = require(fields, field)?
        .as_f64()
        .ok_or(AnswersViolation::WrongType {
            field,
            expected: "a number",
        })?;

    if value < 0.0 {
        return Err(AnswersViolation::Negative { field, value });
    }
    Ok(value)
}
