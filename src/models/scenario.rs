//! Saved scenario shape.
//!
//! A scenario is a named snapshot of the line parameters and the raw task
//! rows, exactly as entered. Only round-trip fidelity matters here: the
//! engine never reads scenarios directly, it receives
//! [`Scenario::to_inputs`].

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LineParameters, TaskInput};
use crate::error::ScenarioError;

/// Scenario metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScenarioMeta {
    /// Free-text note.
    pub note: String,
    /// When the scenario was captured.
    pub saved_at: Option<DateTime<Utc>>,
}

/// A saved balancing scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub meta: ScenarioMeta,
    pub params: LineParameters,
    pub tasks: Vec<TaskInput>,
}

/// Wire form with every section optional, so a missing section is reported
/// as a shape error rather than a serde message.
#[derive(Deserialize)]
struct RawScenario {
    #[serde(default)]
    meta: Option<ScenarioMeta>,
    #[serde(default)]
    params: Option<LineParameters>,
    #[serde(default)]
    tasks: Option<Vec<TaskInput>>,
}

impl Scenario {
    /// Captures the current inputs, stamped with the current time.
    pub fn from_run(note: impl Into<String>, params: LineParameters, tasks: Vec<TaskInput>) -> Self {
        Self {
            meta: ScenarioMeta {
                note: note.into(),
                saved_at: Some(Utc::now()),
            },
            params,
            tasks,
        }
    }

    /// Parses a scenario from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        let raw: RawScenario = serde_json::from_str(text)?;
        let params = raw.params.ok_or(ScenarioError::InvalidShape("params"))?;
        let tasks = raw.tasks.ok_or(ScenarioError::InvalidShape("tasks"))?;
        Ok(Self {
            meta: raw.meta.unwrap_or_default(),
            params,
            tasks,
        })
    }

    /// Serializes to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a scenario file.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Writes the scenario as indented JSON.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ScenarioError> {
        let path = path.as_ref();
        let text = self.to_json_pretty()?;
        fs::write(path, text).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Engine inputs: the parameters and the task rows.
    pub fn to_inputs(&self) -> (LineParameters, Vec<TaskInput>) {
        (self.params.clone(), self.tasks.clone())
    }
}

/// File name used when exporting a scenario under `name`.
///
/// Lower-cases the name and replaces anything that is not an ASCII letter
/// or digit with `_`. A blank name exports as `escenario.json`.
pub fn export_file_name(name: &str) -> String {
    let name = name.trim();
    let stem = if name.is_empty() { "escenario" } else { name };
    let sanitized: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{sanitized}.json")
}
