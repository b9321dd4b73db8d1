//! Ranked positional weight station assigner.
//!
//! # Algorithm
//!
//! 1. Sort tasks once by positional weight, descending (stable: ties keep
//!    input order).
//! 2. Open a station. Repeatedly take, among unassigned tasks whose
//!    predecessors are all assigned, the first in PW order that fits in the
//!    remaining budget (`cycle_time - station time`).
//! 3. If nothing fits, close the station, unless it is still empty: then the
//!    first candidate is forced in and the station runs over the cycle time.
//! 4. A station whose time reaches the cycle time is closed immediately.
//!
//! Every pass over an open station assigns at least one task, so the loop
//! ends once all codes are assigned.
//!
//! # Complexity
//! O(n² · p) where n=tasks, p=predecessors per task.
//!
//! # Reference
//! Helgeson & Birnie (1961), "Assembly Line Balancing Using the Ranked
//! Positional Weight Technique"

use std::collections::HashSet;

use tracing::debug;

use crate::models::{Station, Task};

/// Greedy PW-ordered station assigner.
///
/// # Example
///
/// ```
/// use u_linebalance::balancing::StationAssigner;
/// use u_linebalance::models::Task;
///
/// let mut a = Task::new("A", 30.0);
/// a.standard_time = 30.0;
/// a.positional_weight = 45.0;
/// let mut b = Task::new("B", 15.0).with_predecessor("A");
/// b.standard_time = 15.0;
/// b.positional_weight = 15.0;
/// let mut tasks = vec![a, b];
///
/// let stations = StationAssigner::new(60.0).assign(&mut tasks);
/// assert_eq!(stations.len(), 1);
/// assert_eq!(tasks[1].station, Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct StationAssigner {
    cycle_time: f64,
}

impl StationAssigner {
    /// Creates an assigner for the given cycle time (s).
    pub fn new(cycle_time: f64) -> Self {
        Self { cycle_time }
    }

    /// Assigns tasks to stations and records each task's station id.
    ///
    /// Expects `standard_time` and `positional_weight` to be filled. Returns
    /// no stations for an empty task list or a non-positive cycle time.
    pub fn assign(&self, tasks: &mut [Task]) -> Vec<Station> {
        for task in tasks.iter_mut() {
            task.station = None;
        }
        let (stations, placements) = self.plan(tasks);
        for (pos, station_id) in placements {
            tasks[pos].station = Some(station_id);
        }
        stations
    }

    /// Builds the stations without touching the tasks.
    ///
    /// Returns the stations and (task position, station id) placements.
    fn plan(&self, tasks: &[Task]) -> (Vec<Station>, Vec<(usize, usize)>) {
        let mut stations = Vec::new();
        let mut placements = Vec::new();
        if tasks.is_empty() || !(self.cycle_time > 0.0) {
            return (stations, placements);
        }

        let order = Self::sort_by_weight(tasks);
        let mut unassigned: HashSet<&str> = tasks.iter().map(|t| t.code.as_str()).collect();

        while !unassigned.is_empty() {
            let mut station = Station::new(stations.len() + 1);

            loop {
                let candidates: Vec<usize> = order
                    .iter()
                    .copied()
                    .filter(|&pos| {
                        let task = &tasks[pos];
                        unassigned.contains(task.code.as_str())
                            && task
                                .predecessors
                                .iter()
                                .all(|p| !unassigned.contains(p.as_str()))
                    })
                    .collect();
                if candidates.is_empty() {
                    break;
                }

                let remaining = station.remaining(self.cycle_time);
                let fitting = candidates
                    .iter()
                    .copied()
                    .find(|&pos| tasks[pos].standard_time <= remaining);

                let chosen = match fitting {
                    Some(pos) => pos,
                    None if station.is_empty() => {
                        debug!(
                            code = %tasks[candidates[0]].code,
                            station = station.id,
                            "forcing oversized operation into empty station"
                        );
                        candidates[0]
                    }
                    None => break,
                };

                let task = &tasks[chosen];
                station.push(task.code.clone(), task.standard_time);
                unassigned.remove(task.code.as_str());
                placements.push((chosen, station.id));

                if station.time >= self.cycle_time {
                    break;
                }
            }

            let stalled = station.is_empty();
            stations.push(station);
            if stalled {
                // Nothing is eligible: only a precedence cycle can cause this.
                debug!(left = unassigned.len(), "no eligible operation, stopping");
                break;
            }
        }

        (stations, placements)
    }

    /// Task positions sorted by positional weight, descending, stable.
    fn sort_by_weight(tasks: &[Task]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..tasks.len()).collect();
        indices.sort_by(|&a, &b| {
            tasks[b]
                .positional_weight
                .total_cmp(&tasks[a].positional_weight)
        });
        indices
    }
}
