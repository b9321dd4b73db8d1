//! Raw task input records.
//!
//! This is the shape operations arrive in from a table, a form or a
//! scenario file: every numeric field may be a number, a numeric string,
//! a blank string or missing entirely. Normalization into [`Task`] happens
//! in [`crate::normalize`].
//!
//! [`Task`]: super::Task

use serde::{Deserialize, Serialize};

use crate::normalize::safe_number;

/// A numeric field that may have been entered as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    /// A JSON number.
    Number(f64),
    /// Anything typed as text, including blanks.
    Text(String),
}

impl LooseNumber {
    /// Whether the field was left empty.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    /// Coerces to a number, using `fallback` when the value does not parse.
    pub fn value_or(&self, fallback: f64) -> f64 {
        match self {
            Self::Number(n) if n.is_finite() => *n,
            Self::Number(_) => fallback,
            Self::Text(text) => safe_number(text, fallback),
        }
    }
}

impl From<f64> for LooseNumber {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for LooseNumber {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for LooseNumber {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One operation as entered, before normalization.
///
/// Unset `allowance_percent`/`frequency_percent` fall back to the line's
/// global defaults. `predecessors` is a comma-separated list of codes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskInput {
    /// Operation code.
    pub code: String,
    /// Free-text description.
    pub description: String,
    /// Observed time (s). May hold several comma-separated samples.
    pub observed_time: Option<LooseNumber>,
    /// Repetition multiplier.
    pub repetition_multiplier: Option<LooseNumber>,
    /// Allowance (%). Blank = global default.
    pub allowance_percent: Option<LooseNumber>,
    /// Frequency (%). Blank = global default.
    pub frequency_percent: Option<LooseNumber>,
    /// Comma-separated predecessor codes.
    pub predecessors: String,
}

impl TaskInput {
    /// Creates an input row with a code and an observed time.
    pub fn new(code: impl Into<String>, observed_time: impl Into<LooseNumber>) -> Self {
        Self {
            code: code.into(),
            observed_time: Some(observed_time.into()),
            ..Default::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the repetition multiplier.
    pub fn with_multiplier(mut self, multiplier: impl Into<LooseNumber>) -> Self {
        self.repetition_multiplier = Some(multiplier.into());
        self
    }

    /// Sets the allowance percentage.
    pub fn with_allowance(mut self, percent: impl Into<LooseNumber>) -> Self {
        self.allowance_percent = Some(percent.into());
        self
    }

    /// Sets the frequency percentage.
    pub fn with_frequency(mut self, percent: impl Into<LooseNumber>) -> Self {
        self.frequency_percent = Some(percent.into());
        self
    }

    /// Sets the comma-separated predecessor list.
    pub fn with_predecessors(mut self, predecessors: impl Into<String>) -> Self {
        self.predecessors = predecessors.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loose_number_blank() {
        assert!(LooseNumber::from("").is_blank());
        assert!(LooseNumber::from("   ").is_blank());
        assert!(!LooseNumber::from("0").is_blank());
        assert!(!LooseNumber::from(0.0).is_blank());
    }

    #[test]
    fn test_loose_number_value() {
        assert!((LooseNumber::from(12.5).value_or(0.0) - 12.5).abs() < 1e-10);
        assert!((LooseNumber::from("7.25").value_or(0.0) - 7.25).abs() < 1e-10);
        assert!((LooseNumber::from("abc").value_or(3.0) - 3.0).abs() < 1e-10);
        assert!((LooseNumber::from(f64::NAN).value_or(1.0) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_task_input_deserialize_mixed() {
        let json = r#"{
            "code": "OP10",
            "observedTime": "20, 25",
            "repetitionMultiplier": 1,
            "allowancePercent": "",
            "frequencyPercent": null,
            "predecessors": "OP05,OP07"
        }"#;
        let input: TaskInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.code, "OP10");
        assert_eq!(input.observed_time, Some(LooseNumber::from("20, 25")));
        assert_eq!(input.repetition_multiplier, Some(LooseNumber::Number(1.0)));
        assert!(input.allowance_percent.as_ref().is_some_and(LooseNumber::is_blank));
        assert!(input.frequency_percent.is_none());
        assert!(input.description.is_empty());
    }

    #[test]
    fn test_task_input_builder() {
        let input = TaskInput::new("A", 30.0)
            .with_description("Mount")
            .with_multiplier(2.0)
            .with_allowance("10")
            .with_frequency(50.0)
            .with_predecessors("X, Y");

        assert_eq!(input.code, "A");
        assert_eq!(input.description, "Mount");
        assert_eq!(input.allowance_percent, Some(LooseNumber::from("10")));
        assert_eq!(input.predecessors, "X, Y");
    }
}
