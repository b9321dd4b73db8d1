//! Input validation for line balancing.
//!
//! Checks run parameters and the precedence structure of a task list before
//! balancing. Detects:
//! - Non-positive available time or demand
//! - Empty task lists
//! - Duplicate operation codes
//! - Predecessor references to codes that do not exist
//! - Circular precedence (DAG validation)
//!
//! Problems are reported as [`Diagnostic`]s and never raised: the caller
//! decides what blocks.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use serde::{Deserialize, Serialize};

use crate::graph::PrecedenceGraph;
use crate::models::{LineParameters, Task};

/// Validation result.
pub type ValidationResult = Result<(), Vec<Diagnostic>>;

/// A diagnostic message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Diagnostic category.
    pub kind: DiagnosticKind,
    /// Whether this diagnostic stops balancing.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

/// How a diagnostic affects the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    /// Station assignment is not attempted.
    Blocking,
    /// Reported alongside the results.
    Warning,
}

/// Categories of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// Available time per period is not positive.
    InvalidAvailableTime,
    /// Demand per period is not positive.
    InvalidDemand,
    /// No operation has both a code and a positive observed time.
    NoTasks,
    /// Two operations share a code.
    DuplicateCode,
    /// An operation references a predecessor that doesn't exist.
    DanglingPredecessor,
    /// Precedence graph contains a cycle.
    Cycle,
    /// An operation alone is longer than the cycle time.
    ExceedsCycleTime,
    /// Fewer stations than the theoretical minimum.
    BelowTheoreticalMinimum,
    /// Unexpected fault during the calculation.
    Internal,
}

impl DiagnosticKind {
    /// Severity a diagnostic of this kind carries unless overridden.
    pub fn default_severity(self) -> Severity {
        match self {
            Self::ExceedsCycleTime | Self::BelowTheoreticalMinimum => Severity::Warning,
            _ => Severity::Blocking,
        }
    }
}

impl Diagnostic {
    pub(crate) fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            message: message.into(),
        }
    }

    /// Whether this diagnostic stops balancing.
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Blocking
    }
}

/// Checks the run parameters and that at least one operation qualified.
///
/// Checks, in order:
/// 1. Available time > 0
/// 2. Demand > 0
/// 3. At least one task
pub fn validate_parameters(params: &LineParameters, task_count: usize) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if !(params.available_time_minutes > 0.0) {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::InvalidAvailableTime,
            "Available time per period must be greater than 0.",
        ));
    }
    if !(params.demand_per_period > 0.0) {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::InvalidDemand,
            "Demand per period must be greater than 0.",
        ));
    }
    if task_count == 0 {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::NoTasks,
            "There are no operations with a code and an observed time > 0. Enter at least one.",
        ));
    }

    diagnostics
}

/// Checks the precedence structure of a task list.
///
/// Checks, accumulated in this order:
/// 1. One message per task whose code was already used
/// 2. One message per unresolved predecessor reference
/// 3. One message per revisit of an in-progress node during DFS
///
/// `graph` must have been built from `tasks`.
pub fn validate_precedences(tasks: &[Task], graph: &PrecedenceGraph) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for &pos in graph.duplicates() {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::DuplicateCode,
            format!(
                "Operation code \"{}\" is duplicated. Each operation must have a unique code.",
                tasks[pos].code
            ),
        ));
    }

    for (pos, missing) in graph.dangling() {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::DanglingPredecessor,
            format!(
                "Operation {} lists {} as a predecessor, which does not exist in the table.",
                tasks[*pos].code, missing
            ),
        ));
    }

    for node in graph.cycle_entries() {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::Cycle,
            format!(
                "A precedence cycle was detected involving operation {}.",
                graph.code(node)
            ),
        ));
    }

    diagnostics
}

/// Validates a task list on its own.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(diagnostics)` with all detected issues.
pub fn validate_input(tasks: &[Task]) -> ValidationResult {
    let graph = PrecedenceGraph::build(tasks);
    let diagnostics = validate_precedences(tasks, &graph);
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(diagnostics)
    }
}
