//! Line balancing domain models.
//!
//! Provides the data types for describing a manual assembly line and the
//! result of balancing it.
//!
//! # Domain Mappings
//!
//! | u-linebalance | Garment line | Electronics assembly | Packaging |
//! |---------------|--------------|----------------------|-----------|
//! | Task | Sewing operation | Insertion step | Folding/filling step |
//! | Station | Operator seat | Bench | Cell |
//! | LineParameters | Shift minutes + daily order | Shift + build plan | Shift + dispatch plan |
//! | Scenario | Saved style setup | Saved variant | Saved SKU setup |

mod input;
mod params;
mod scenario;
mod station;
mod task;

pub use input::{LooseNumber, TaskInput};
pub use params::LineParameters;
pub use scenario::{export_file_name, Scenario, ScenarioMeta};
pub use station::Station;
pub use task::Task;
