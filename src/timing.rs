//! Standard-time calculation.
//!
//! ```text
//! standard = observed × (1 + allowance/100) × frequency_factor / max(multiplier, 1)
//! frequency_factor = frequency/100, or 1 when frequency ≤ 0
//! ```
//!
//! Standard times depend only on each task's own inputs, never on order or
//! on the precedence graph.
//!
//! # Reference
//! Niebel & Freivalds (2009), "Methods, Standards, and Work Design", Ch. 11

use crate::models::Task;

/// Frequency correction. Non-positive frequencies mean "every cycle".
#[inline]
pub fn frequency_factor(frequency_percent: f64) -> f64 {
    if frequency_percent > 0.0 {
        frequency_percent / 100.0
    } else {
        1.0
    }
}

/// Allowance correction.
#[inline]
pub fn allowance_factor(allowance_percent: f64) -> f64 {
    1.0 + allowance_percent / 100.0
}

/// Standard time of one task (s).
pub fn standard_time(task: &Task) -> f64 {
    let divisor = if task.repetition_multiplier >= 1.0 {
        task.repetition_multiplier
    } else {
        1.0
    };
    task.observed_time
        * allowance_factor(task.allowance_percent)
        * frequency_factor(task.frequency_percent)
        / divisor
}

/// Fills `standard_time` on every task and returns the total work content.
pub fn compute_standard_times(tasks: &mut [Task]) -> f64 {
    let mut total = 0.0;
    for task in tasks.iter_mut() {
        task.standard_time = standard_time(task);
        total += task.standard_time;
    }
    total
}

/// Sum of the standard times already stored on `tasks`.
pub fn total_work_content(tasks: &[Task]) -> f64 {
    tasks.iter().map(|t| t.standard_time).sum()
}

/// Lower bound on the station count, ignoring precedence packing losses.
///
/// Returns 0 for a non-positive cycle time.
pub fn theoretical_min_stations(total_work_content: f64, cycle_time: f64) -> usize {
    if cycle_time > 0.0 {
        (total_work_content / cycle_time).ceil().max(0.0) as usize
    } else {
        0
    }
}
