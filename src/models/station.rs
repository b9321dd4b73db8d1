//! Station (workstation) model.
//!
//! A station is an ordered group of operations assigned to one worker or
//! location. Ids start at 1 and follow creation order.

use serde::{Deserialize, Serialize};

/// A workstation produced by balancing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Station id (1-based).
    pub id: usize,
    /// Assigned operation codes, in assignment order.
    pub task_codes: Vec<String>,
    /// Accumulated standard time (s).
    pub time: f64,
}

impl Station {
    /// Opens an empty station.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            task_codes: Vec::new(),
            time: 0.0,
        }
    }

    /// Appends an operation and its time.
    pub fn push(&mut self, code: impl Into<String>, time: f64) {
        self.task_codes.push(code.into());
        self.time += time;
    }

    /// Whether no operation has been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.task_codes.is_empty()
    }

    /// Number of assigned operations.
    pub fn task_count(&self) -> usize {
        self.task_codes.len()
    }

    /// Budget left under the cycle time (negative when overloaded).
    #[inline]
    pub fn remaining(&self, cycle_time: f64) -> f64 {
        cycle_time - self.time
    }

    /// Idle time per cycle. Same as [`Station::remaining`].
    #[inline]
    pub fn idle_time(&self, cycle_time: f64) -> f64 {
        self.remaining(cycle_time)
    }

    /// Station time as a fraction of the cycle time.
    ///
    /// Returns `None` for a non-positive cycle time.
    pub fn utilization(&self, cycle_time: f64) -> Option<f64> {
        if cycle_time <= 0.0 {
            return None;
        }
        Some(self.time / cycle_time)
    }

    /// Whether the station holds more work than one cycle allows.
    pub fn is_overloaded(&self, cycle_time: f64) -> bool {
        self.time > cycle_time
    }
}
