//! Error types.
//!
//! The balancing engine itself never returns these to its caller: engine
//! faults are folded into a blocking diagnostic by
//! [`LineBalancer`](crate::engine::LineBalancer). Scenario I/O is the only
//! public fallible edge.

use std::path::PathBuf;

use thiserror::Error;

/// Internal faults of a recalculation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BalanceError {
    /// Positional weights were requested on a graph that still has a cycle.
    #[error("precedence cycle reached at operation {code} while propagating positional weights")]
    CyclicGraph { code: String },

    /// Anything else that should not happen.
    #[error("{0}")]
    Internal(String),
}

/// Errors reading or writing a scenario file.
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("failed to access scenario file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scenario has no '{0}' section")]
    InvalidShape(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_error_display() {
        let err = BalanceError::CyclicGraph { code: "A".into() };
        assert!(err.to_string().contains("operation A"));
        assert_eq!(BalanceError::Internal("boom".into()).to_string(), "boom");
    }

    #[test]
    fn test_scenario_error_display() {
        assert_eq!(
            ScenarioError::InvalidShape("params").to_string(),
            "scenario has no 'params' section"
        );
    }
}
