//! Line balancing engine.
//!
//! One recalculation is one pure function application: inputs in, a full
//! [`BalanceReport`] out. No state is kept between runs.
//!
//! # Pipeline
//!
//! 1. Normalize input rows into tasks (derived fields reset).
//! 2. Check run parameters. Any failure here stops the run.
//! 3. Compute standard times and the total work content.
//! 4. Build the precedence graph, link successors, validate precedence.
//!    Blocking problems stop the run after step 3's results are reported.
//! 5. Propagate positional weights.
//! 6. Assign stations and compute KPIs.
//! 7. Add advisory warnings (oversized operations, under-provisioning).
//!
//! Engine faults never escape: they become a single blocking diagnostic.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::balancing::{LineKpi, StationAssigner};
use crate::error::BalanceError;
use crate::graph::PrecedenceGraph;
use crate::models::{LineParameters, Station, Task, TaskInput};
use crate::normalize::normalize_tasks;
use crate::timing;
use crate::validation::{self, Diagnostic, DiagnosticKind, Severity};
use crate::weights;

/// How duplicate operation codes affect a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicatePolicy {
    /// Duplicates block station assignment.
    #[default]
    Block,
    /// Duplicates are reported as warnings; the first task with a code
    /// owns it in every lookup.
    Warn,
}

/// Result of one recalculation.
///
/// Serializes `messages` as plain strings and the structured list under
/// `diagnostics`. Deserialization reads `diagnostics` and ignores
/// `messages`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    /// Diagnostics in the order they were produced.
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
    /// Whether any diagnostic is blocking.
    pub is_blocking_error: bool,
    /// Takt (s). 0 when it cannot be computed.
    pub cycle_time: f64,
    /// Sum of standard times (s).
    pub total_work_content: f64,
    /// `ceil(work content / cycle time)`, 0 without a cycle time.
    pub theoretical_min_stations: usize,
    /// Stations in assignment order.
    pub stations: Vec<Station>,
    /// Line KPIs.
    pub kpis: LineKpi,
    /// Tasks with derived fields.
    pub tasks: Vec<Task>,
}

impl BalanceReport {
    /// Report of a run that hit an engine fault.
    fn failed(detail: &str) -> Self {
        Self {
            diagnostics: vec![Diagnostic::new(
                DiagnosticKind::Internal,
                format!("An unexpected error occurred during the calculations: {detail}"),
            )],
            is_blocking_error: true,
            ..Default::default()
        }
    }

    /// Message texts, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    /// Whether a diagnostic of `kind` was reported.
    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind == kind)
    }

    /// Task with the given code (first occurrence).
    pub fn task(&self, code: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.code == code)
    }

    /// Whether fewer stations were used than the theoretical minimum.
    pub fn is_under_provisioned(&self) -> bool {
        !self.stations.is_empty() && self.stations.len() < self.theoretical_min_stations
    }
}

impl Serialize for BalanceReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("BalanceReport", 9)?;
        state.serialize_field("messages", &self.messages())?;
        state.serialize_field("isBlockingError", &self.is_blocking_error)?;
        state.serialize_field("cycleTime", &self.cycle_time)?;
        state.serialize_field("totalWorkContent", &self.total_work_content)?;
        state.serialize_field("theoreticalMinStations", &self.theoretical_min_stations)?;
        state.serialize_field("stations", &self.stations)?;
        state.serialize_field("kpis", &self.kpis)?;
        state.serialize_field("tasks", &self.tasks)?;
        state.serialize_field("diagnostics", &self.diagnostics)?;
        state.end()
    }
}

/// Line balancing engine.
///
/// # Example
///
/// ```
/// use u_linebalance::engine::LineBalancer;
/// use u_linebalance::models::{LineParameters, TaskInput};
///
/// // 480 min for 480 units → 60 s takt
/// let params = LineParameters::new(480.0, 480.0);
/// let inputs = vec![
///     TaskInput::new("A", 30.0),
///     TaskInput::new("B", 25.0).with_predecessors("A"),
///     TaskInput::new("C", 20.0).with_predecessors("A"),
///     TaskInput::new("D", 15.0).with_predecessors("B,C"),
/// ];
///
/// let report = LineBalancer::new().recalculate(&params, &inputs);
/// assert!(!report.is_blocking_error);
/// assert_eq!(report.stations.len(), 2);
/// assert_eq!(report.stations[0].task_codes, vec!["A", "B"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LineBalancer {
    duplicate_policy: DuplicatePolicy,
}

impl LineBalancer {
    /// Creates an engine that blocks on duplicate codes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how duplicate codes are treated.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Recalculates from raw input rows.
    ///
    /// Rows without a code or without a positive observed time are ignored.
    #[instrument(skip_all, fields(rows = inputs.len()))]
    pub fn recalculate(&self, params: &LineParameters, inputs: &[TaskInput]) -> BalanceReport {
        self.guarded(|| {
            let tasks = normalize_tasks(inputs, params);
            debug!(qualified = tasks.len(), "normalized input rows");
            self.run(params, tasks)
        })
    }

    /// Recalculates from tasks that are already normalized.
    ///
    /// Derived fields on `tasks` are discarded and recomputed.
    #[instrument(skip_all, fields(tasks = tasks.len()))]
    pub fn balance(&self, params: &LineParameters, tasks: Vec<Task>) -> BalanceReport {
        self.guarded(move || self.run(params, tasks))
    }

    /// Runs `f`, folding errors and panics into a failed report.
    fn guarded<F>(&self, f: F) -> BalanceReport
    where
        F: FnOnce() -> Result<BalanceReport, BalanceError>,
    {
        let outcome = panic::catch_unwind(AssertUnwindSafe(f))
            .unwrap_or_else(|payload| Err(BalanceError::Internal(panic_detail(payload.as_ref()))));

        match outcome {
            Ok(report) => report,
            Err(err) => {
                warn!(error = %err, "recalculation failed");
                BalanceReport::failed(&err.to_string())
            }
        }
    }

    fn run(&self, params: &LineParameters, mut tasks: Vec<Task>) -> Result<BalanceReport, BalanceError> {
        for task in &mut tasks {
            task.reset_derived();
        }

        let mut diagnostics = validation::validate_parameters(params, tasks.len());
        let cycle_time = params.cycle_time();
        if !diagnostics.is_empty() {
            warn!(count = diagnostics.len(), "run parameters rejected");
            return Ok(BalanceReport {
                diagnostics,
                is_blocking_error: true,
                cycle_time,
                tasks,
                ..Default::default()
            });
        }

        let available_seconds = params.available_seconds();
        let total_work_content = timing::compute_standard_times(&mut tasks);
        let theoretical_min_stations =
            timing::theoretical_min_stations(total_work_content, cycle_time);
        debug!(cycle_time, total_work_content, "standard times computed");

        let graph = PrecedenceGraph::build(&tasks);
        weights::link_successors(&mut tasks, &graph);

        let mut precedence = validation::validate_precedences(&tasks, &graph);
        if self.duplicate_policy == DuplicatePolicy::Warn {
            for d in precedence
                .iter_mut()
                .filter(|d| d.kind == DiagnosticKind::DuplicateCode)
            {
                d.severity = Severity::Warning;
            }
        }
        let blocked = precedence.iter().any(Diagnostic::is_blocking);
        diagnostics.append(&mut precedence);

        if blocked {
            warn!(count = diagnostics.len(), "precedence problems, skipping station assignment");
            return Ok(BalanceReport {
                diagnostics,
                is_blocking_error: true,
                cycle_time,
                total_work_content,
                theoretical_min_stations,
                stations: Vec::new(),
                kpis: LineKpi::unbalanced(total_work_content),
                tasks,
            });
        }

        weights::propagate(&mut tasks, &graph)?;
        let stations = StationAssigner::new(cycle_time).assign(&mut tasks);
        let kpis = LineKpi::calculate(&tasks, &stations, cycle_time, available_seconds);
        debug!(
            stations = stations.len(),
            efficiency = kpis.efficiency_percent,
            "stations assigned"
        );

        let oversized: Vec<&str> = tasks
            .iter()
            .filter(|t| t.exceeds(cycle_time))
            .map(|t| t.code.as_str())
            .collect();
        if !oversized.is_empty() {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::ExceedsCycleTime,
                format!(
                    "Warning: operations {} have a standard time greater than the takt time. \
                     The line cannot meet demand.",
                    oversized.join(", ")
                ),
            ));
        }
        if !stations.is_empty() && stations.len() < theoretical_min_stations {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::BelowTheoreticalMinimum,
                format!(
                    "Warning: the number of PW stations ({}) is below the theoretical minimum ({}). \
                     Review the inputs.",
                    stations.len(),
                    theoretical_min_stations
                ),
            ));
        }

        let is_blocking_error = diagnostics.iter().any(Diagnostic::is_blocking);
        Ok(BalanceReport {
            diagnostics,
            is_blocking_error,
            cycle_time,
            total_work_content,
            theoretical_min_stations,
            stations,
            kpis,
            tasks,
        })
    }
}

/// Text of a panic payload.
fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown fault".to_string()
    }
}
