//! Line quality metrics (KPIs).
//!
//! Computes the standard line balancing indicators from a station
//! assignment and the cycle time.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Efficiency | work content / (stations × cycle time) × 100 |
//! | Balance delay | 100 − efficiency |
//! | Idle time | stations × cycle time − work content |
//! | Bottleneck | longest operation if it exceeds takt, else busiest station |
//! | Capacity/hour | 3600 / bottleneck |
//! | Capacity/period | available seconds / bottleneck |
//!
//! # Reference
//! Groover (2015), "Automation, Production Systems, and Computer-Integrated
//! Manufacturing", Ch. 15.2: Line Balancing

use serde::{Deserialize, Serialize};

use crate::models::{Station, Task};
use crate::timing;

/// Line performance indicators.
///
/// All time values are in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineKpi {
    /// Sum of standard times.
    pub total_work_content: f64,
    /// Number of stations produced.
    pub real_station_count: usize,
    /// Line efficiency (%).
    pub efficiency_percent: f64,
    /// Balance delay (%).
    pub balance_delay_percent: f64,
    /// Idle time per cycle across all stations.
    pub idle_time: f64,
    /// Longest single standard time.
    pub max_operation_time: f64,
    /// Longest station time.
    pub max_station_time: f64,
    /// Time that limits throughput.
    pub bottleneck_time: f64,
    /// Units per hour at the bottleneck.
    pub capacity_per_hour: f64,
    /// Units per period at the bottleneck.
    pub capacity_per_period: f64,
}

impl LineKpi {
    /// Computes KPIs from a station assignment.
    ///
    /// # Arguments
    /// * `tasks` - Tasks with `standard_time` filled.
    /// * `stations` - The stations produced for these tasks.
    /// * `cycle_time` - Takt (s).
    /// * `available_seconds` - Available time per period (s).
    pub fn calculate(
        tasks: &[Task],
        stations: &[Station],
        cycle_time: f64,
        available_seconds: f64,
    ) -> Self {
        let total_work_content = timing::total_work_content(tasks);
        let real_station_count = stations.len();

        let mut efficiency_percent = 0.0;
        let mut balance_delay_percent = 0.0;
        let mut idle_time = 0.0;
        if cycle_time > 0.0 && real_station_count > 0 {
            let line_time = real_station_count as f64 * cycle_time;
            efficiency_percent = total_work_content / line_time * 100.0;
            balance_delay_percent = 100.0 - efficiency_percent;
            idle_time = line_time - total_work_content;
        }

        let max_operation_time = tasks
            .iter()
            .map(|t| t.standard_time)
            .fold(0.0_f64, f64::max);
        let max_station_time = stations.iter().map(|s| s.time).fold(0.0_f64, f64::max);

        // An operation longer than takt is the bottleneck whatever the grouping.
        let bottleneck_time = if max_operation_time > cycle_time {
            max_operation_time
        } else {
            max_station_time
        };

        let (capacity_per_hour, capacity_per_period) = if bottleneck_time > 0.0 {
            (3600.0 / bottleneck_time, available_seconds / bottleneck_time)
        } else {
            (0.0, 0.0)
        };

        Self {
            total_work_content,
            real_station_count,
            efficiency_percent,
            balance_delay_percent,
            idle_time,
            max_operation_time,
            max_station_time,
            bottleneck_time,
            capacity_per_hour,
            capacity_per_period,
        }
    }

    /// KPIs of a run that was not balanced: only the work content is known.
    pub fn unbalanced(total_work_content: f64) -> Self {
        Self {
            total_work_content,
            ..Default::default()
        }
    }
}
