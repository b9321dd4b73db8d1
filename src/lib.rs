//! Assembly line balancing for the U-Engine ecosystem.
//!
//! Derives standard times from observed times, ranks operations by
//! positional weight, packs them into takt-constrained stations and reports
//! the resulting line KPIs.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Task`, `TaskInput`, `Station`,
//!   `LineParameters`, `Scenario`
//! - **`normalize`**: Lenient conversion of raw rows into tasks
//! - **`timing`**: Standard times, takt, theoretical minimum stations
//! - **`graph`**: Arena precedence graph with iterative DFS
//! - **`validation`**: Input integrity checks (duplicate codes, dangling
//!   predecessors, cycles, run parameters)
//! - **`weights`**: Successor inversion and positional weights
//! - **`balancing`**: Station assignment and KPIs
//! - **`engine`**: The full recalculation (`LineBalancer`)
//!
//! # Architecture
//!
//! The engine is synchronous and stateless: each recalculation builds its
//! tasks fresh from input and returns a complete `BalanceReport`. Problems
//! are reported as diagnostics, never raised.
//!
//! # References
//!
//! - Helgeson & Birnie (1961), "Assembly Line Balancing Using the Ranked
//!   Positional Weight Technique"
//! - Groover (2015), "Automation, Production Systems, and
//!   Computer-Integrated Manufacturing", Ch. 15
//! - Scholl (1999), "Balancing and Sequencing of Assembly Lines"

pub mod balancing;
pub mod engine;
pub mod error;
pub mod graph;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod timing;
pub mod validation;
pub mod weights;
