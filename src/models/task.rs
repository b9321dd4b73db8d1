//! Task (operation) model.
//!
//! A task is one manual operation on the line: an observed time measured
//! per cycle, the corrections that turn it into a standard time, and the
//! codes of the operations that must precede it.
//!
//! # Derived Fields
//! `successors`, `standard_time`, `positional_weight` and `station` are
//! rebuilt from scratch on every recalculation. Nothing derived survives
//! from one run to the next.
//!
//! # Reference
//! Groover (2015), "Automation, Production Systems, and Computer-Integrated
//! Manufacturing", Ch. 15: Manual Assembly Lines

use serde::{Deserialize, Serialize};

/// An operation to be balanced.
///
/// All times are in seconds per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique operation code.
    pub code: String,
    /// Free-text description.
    pub description: String,
    /// Observed time per cycle (s).
    pub observed_time: f64,
    /// Repetition multiplier (≥ 1). Divides the standard time.
    pub repetition_multiplier: f64,
    /// Fatigue/personal/delay allowance (%).
    pub allowance_percent: f64,
    /// How often per cycle the step occurs (%). `<= 0` means every cycle.
    pub frequency_percent: f64,
    /// Codes of operations that must be done before this one, as entered.
    pub predecessors: Vec<String>,
    /// Codes of operations that list this one as a predecessor.
    pub successors: Vec<String>,
    /// Standard time (s).
    pub standard_time: f64,
    /// Positional weight (s).
    pub positional_weight: f64,
    /// Assigned station id, once balancing succeeded.
    pub station: Option<usize>,
}

impl Task {
    /// Creates a task with the given code and observed time.
    ///
    /// Multiplier defaults to 1, allowance to 0% and frequency to 100%.
    pub fn new(code: impl Into<String>, observed_time: f64) -> Self {
        Self {
            code: code.into(),
            description: String::new(),
            observed_time,
            repetition_multiplier: 1.0,
            allowance_percent: 0.0,
            frequency_percent: 100.0,
            predecessors: Vec::new(),
            successors: Vec::new(),
            standard_time: 0.0,
            positional_weight: 0.0,
            station: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the repetition multiplier.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.repetition_multiplier = multiplier;
        self
    }

    /// Sets the allowance percentage.
    pub fn with_allowance(mut self, percent: f64) -> Self {
        self.allowance_percent = percent;
        self
    }

    /// Sets the frequency percentage.
    pub fn with_frequency(mut self, percent: f64) -> Self {
        self.frequency_percent = percent;
        self
    }

    /// Adds a predecessor code.
    pub fn with_predecessor(mut self, code: impl Into<String>) -> Self {
        self.predecessors.push(code.into());
        self
    }

    /// Clears every derived field.
    pub fn reset_derived(&mut self) {
        self.successors.clear();
        self.standard_time = 0.0;
        self.positional_weight = 0.0;
        self.station = None;
    }

    /// Whether this operation alone is longer than the cycle time.
    ///
    /// Always `false` for a non-positive cycle time.
    pub fn exceeds(&self, cycle_time: f64) -> bool {
        cycle_time > 0.0 && self.standard_time > cycle_time
    }
}
