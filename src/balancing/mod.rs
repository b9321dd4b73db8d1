//! Station assignment and KPI evaluation.
//!
//! # Algorithm
//!
//! `StationAssigner` packs operations into stations under the cycle time,
//! in ranked positional weight order, respecting precedence. It is not
//! optimal, but gives a fast, deterministic baseline.
//!
//! # KPI
//!
//! `LineKpi` computes efficiency, balance delay, idle time, bottleneck and
//! throughput capacity.
//!
//! # References
//!
//! - Helgeson & Birnie (1961), "Assembly Line Balancing Using the Ranked
//!   Positional Weight Technique"
//! - Scholl (1999), "Balancing and Sequencing of Assembly Lines"

mod assigner;
mod kpi;

pub use assigner::StationAssigner;
pub use kpi::LineKpi;
