//! Run parameters for one line.
//!
//! Takt (cycle time) is the available time per period divided by the
//! demand per period. Both must be positive for takt to exist.

use serde::{Deserialize, Serialize};

/// Scalar parameters of a balancing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineParameters {
    /// Available production time per period (min).
    pub available_time_minutes: f64,
    /// Units demanded per period.
    pub demand_per_period: f64,
    /// Allowance applied to operations that do not set their own (%).
    pub default_allowance_percent: f64,
    /// Frequency applied to operations that do not set their own (%).
    pub default_frequency_percent: f64,
}

impl LineParameters {
    /// Creates parameters with 0% default allowance and 100% default frequency.
    pub fn new(available_time_minutes: f64, demand_per_period: f64) -> Self {
        Self {
            available_time_minutes,
            demand_per_period,
            ..Default::default()
        }
    }

    /// Sets the global default allowance.
    pub fn with_default_allowance(mut self, percent: f64) -> Self {
        self.default_allowance_percent = percent;
        self
    }

    /// Sets the global default frequency.
    pub fn with_default_frequency(mut self, percent: f64) -> Self {
        self.default_frequency_percent = percent;
        self
    }

    /// Available time per period in seconds.
    #[inline]
    pub fn available_seconds(&self) -> f64 {
        self.available_time_minutes * 60.0
    }

    /// Cycle time (takt) in seconds per unit.
    ///
    /// Returns 0 when either the available time or the demand is not positive.
    pub fn cycle_time(&self) -> f64 {
        if self.available_time_minutes > 0.0 && self.demand_per_period > 0.0 {
            self.available_seconds() / self.demand_per_period
        } else {
            0.0
        }
    }
}

impl Default for LineParameters {
    fn default() -> Self {
        Self {
            available_time_minutes: 0.0,
            demand_per_period: 0.0,
            default_allowance_percent: 0.0,
            default_frequency_percent: 100.0,
        }
    }
}
