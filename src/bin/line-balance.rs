//! line-balance - balance a saved line scenario from the command line.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use u_linebalance::engine::{BalanceReport, DuplicatePolicy, LineBalancer};
use u_linebalance::logging;
use u_linebalance::models::{export_file_name, LineParameters, Scenario};
use u_linebalance::normalize::normalize_tasks;
use u_linebalance::validation::{self, Diagnostic, Severity};

#[derive(Parser)]
#[command(name = "line-balance")]
#[command(about = "Positional-weight line balancing for manual assembly lines", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Balance a scenario and print the report
    Run {
        /// Scenario JSON file
        scenario: PathBuf,

        #[command(flatten)]
        overrides: Overrides,

        /// Report duplicate codes as warnings instead of blocking
        #[arg(long)]
        allow_duplicates: bool,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a scenario's parameters and precedence structure
    Validate {
        /// Scenario JSON file
        scenario: PathBuf,
    },

    /// Save a copy of a scenario, with overrides applied, under a new name
    Export {
        /// Scenario JSON file
        scenario: PathBuf,

        #[command(flatten)]
        overrides: Overrides,

        /// Scenario name; also picks the file name
        #[arg(long, default_value = "")]
        name: String,

        /// Directory to write into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

/// Parameter overrides applied on top of the scenario file.
#[derive(Args)]
struct Overrides {
    /// Available time per period (min)
    #[arg(long, env = "LB_AVAILABLE_MINUTES")]
    available_minutes: Option<f64>,

    /// Demand per period (units)
    #[arg(long, env = "LB_DEMAND")]
    demand: Option<f64>,

    /// Default allowance (%)
    #[arg(long, env = "LB_DEFAULT_ALLOWANCE")]
    allowance: Option<f64>,

    /// Default frequency (%)
    #[arg(long, env = "LB_DEFAULT_FREQUENCY")]
    frequency: Option<f64>,
}

impl Overrides {
    fn apply(&self, mut params: LineParameters) -> LineParameters {
        if let Some(v) = self.available_minutes {
            params.available_time_minutes = v;
        }
        if let Some(v) = self.demand {
            params.demand_per_period = v;
        }
        if let Some(v) = self.allowance {
            params.default_allowance_percent = v;
        }
        if let Some(v) = self.frequency {
            params.default_frequency_percent = v;
        }
        params
    }
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match execute(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Run {
            scenario,
            overrides,
            allow_duplicates,
            json,
        } => {
            let loaded = Scenario::read_from(&scenario)
                .with_context(|| format!("loading scenario {}", scenario.display()))?;
            let (params, inputs) = loaded.to_inputs();
            let params = overrides.apply(params);

            let policy = if allow_duplicates {
                DuplicatePolicy::Warn
            } else {
                DuplicatePolicy::Block
            };
            info!(scenario = %scenario.display(), rows = inputs.len(), "balancing");
            let report = LineBalancer::new()
                .with_duplicate_policy(policy)
                .recalculate(&params, &inputs);

            if json {
                let text =
                    serde_json::to_string_pretty(&report).context("serializing report")?;
                println!("{text}");
            } else {
                print_summary(&report);
            }

            Ok(exit_code(report.is_blocking_error))
        }

        Commands::Validate { scenario } => {
            let loaded = Scenario::read_from(&scenario)
                .with_context(|| format!("loading scenario {}", scenario.display()))?;
            let (count, diagnostics) = validate_scenario(&loaded);

            if diagnostics.is_empty() {
                println!("{count} operations, parameters and precedence OK");
                return Ok(ExitCode::SUCCESS);
            }
            for d in &diagnostics {
                println!("- {}", d.message);
            }
            Ok(exit_code(diagnostics.iter().any(Diagnostic::is_blocking)))
        }

        Commands::Export {
            scenario,
            overrides,
            name,
            out_dir,
        } => {
            let loaded = Scenario::read_from(&scenario)
                .with_context(|| format!("loading scenario {}", scenario.display()))?;
            let path = export_scenario(&loaded, &overrides, &name, &out_dir)?;
            info!(path = %path.display(), "scenario exported");
            println!("{}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Runs the parameter and precedence checks on a scenario.
///
/// Returns the number of qualifying operations and every diagnostic found.
/// Parameter problems come first.
fn validate_scenario(scenario: &Scenario) -> (usize, Vec<Diagnostic>) {
    let tasks = normalize_tasks(&scenario.tasks, &scenario.params);
    let mut diagnostics = validation::validate_parameters(&scenario.params, tasks.len());
    if let Err(mut precedence) = validation::validate_input(&tasks) {
        diagnostics.append(&mut precedence);
    }
    (tasks.len(), diagnostics)
}

/// Writes `scenario`, with overrides applied, as a freshly stamped scenario
/// named `name` in `out_dir`. Returns the written path.
fn export_scenario(
    scenario: &Scenario,
    overrides: &Overrides,
    name: &str,
    out_dir: &Path,
) -> Result<PathBuf> {
    let (params, tasks) = scenario.to_inputs();
    let exported = Scenario::from_run(name.trim(), overrides.apply(params), tasks);
    let path = out_dir.join(export_file_name(name));
    exported
        .write_to(&path)
        .with_context(|| format!("exporting scenario to {}", path.display()))?;
    Ok(path)
}

/// Process status: 2 when a blocking diagnostic was reported.
fn exit_status(blocking: bool) -> u8 {
    if blocking {
        2
    } else {
        0
    }
}

fn exit_code(blocking: bool) -> ExitCode {
    ExitCode::from(exit_status(blocking))
}

fn print_summary(report: &BalanceReport) {
    println!("Takt time:              {:.2} s", report.cycle_time);
    println!("Total work content:     {:.2} s", report.total_work_content);
    println!("Theoretical min. stations: {}", report.theoretical_min_stations);
    println!();

    if !report.tasks.is_empty() {
        println!("{:<10} {:>10} {:>10} {:>8}", "Code", "Std (s)", "PW (s)", "Station");
        for task in &report.tasks {
            let station = task
                .station
                .map(|id| format!("S{id}"))
                .unwrap_or_else(|| "-".to_string());
            let flag = if task.exceeds(report.cycle_time) { " !" } else { "" };
            println!(
                "{:<10} {:>10.2} {:>10.2} {:>8}{flag}",
                task.code, task.standard_time, task.positional_weight, station
            );
        }
        println!();
    }

    for station in &report.stations {
        println!(
            "S{:<3} {:>8.2} s  idle {:>7.2} s  [{}]",
            station.id,
            station.time,
            station.idle_time(report.cycle_time),
            station.task_codes.join(", ")
        );
    }
    if !report.stations.is_empty() {
        println!();
    }

    let k = &report.kpis;
    println!("Stations:       {}", k.real_station_count);
    println!("Efficiency:     {:.2} %", k.efficiency_percent);
    println!("Balance delay:  {:.2} %", k.balance_delay_percent);
    println!("Idle time:      {:.2} s", k.idle_time);
    println!("Bottleneck:     {:.2} s", k.bottleneck_time);
    println!("Capacity/hour:  {:.2}", k.capacity_per_hour);
    println!("Capacity/period: {:.2}", k.capacity_per_period);

    if !report.diagnostics.is_empty() {
        println!();
        for d in &report.diagnostics {
            let tag = match d.severity {
                Severity::Blocking => "error",
                Severity::Warning => "warning",
            };
            println!("[{tag}] {}", d.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_linebalance::models::TaskInput;
    use u_linebalance::validation::DiagnosticKind;

    fn no_overrides() -> Overrides {
        Overrides {
            available_minutes: None,
            demand: None,
            allowance: None,
            frequency: None,
        }
    }

    fn sample() -> Scenario {
        Scenario::from_run(
            "base",
            LineParameters::new(480.0, 480.0).with_default_allowance(10.0),
            vec![
                TaskInput::new("A", 30.0),
                TaskInput::new("B", 20.0).with_predecessors("A"),
            ],
        )
    }

    #[test]
    fn test_overrides_keep_unset_fields() {
        let params = LineParameters::new(480.0, 400.0)
            .with_default_allowance(12.0)
            .with_default_frequency(90.0);
        let merged = no_overrides().apply(params.clone());
        assert_eq!(merged, params);
    }

    #[test]
    fn test_overrides_replace_set_fields() {
        let overrides = Overrides {
            demand: Some(240.0),
            frequency: Some(50.0),
            ..no_overrides()
        };
        let merged = overrides.apply(LineParameters::new(480.0, 400.0).with_default_allowance(12.0));
        assert!((merged.available_time_minutes - 480.0).abs() < 1e-10);
        assert!((merged.demand_per_period - 240.0).abs() < 1e-10);
        assert!((merged.default_allowance_percent - 12.0).abs() < 1e-10);
        assert!((merged.default_frequency_percent - 50.0).abs() < 1e-10);
        assert!((merged.cycle_time() - 120.0).abs() < 1e-10);
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(false), 0);
        assert_eq!(exit_status(true), 2);
    }

    #[test]
    fn test_validate_clean_scenario() {
        let (count, diagnostics) = validate_scenario(&sample());
        assert_eq!(count, 2);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_validate_reports_parameter_problems() {
        let mut scenario = sample();
        scenario.params.demand_per_period = 0.0;
        let (_, diagnostics) = validate_scenario(&scenario);
        assert!(diagnostics.iter().any(|d| d.kind == DiagnosticKind::InvalidDemand));
        assert!(diagnostics.iter().any(Diagnostic::is_blocking));

        let mut scenario = sample();
        scenario.tasks = vec![TaskInput::new("", 10.0)];
        let (count, diagnostics) = validate_scenario(&scenario);
        assert_eq!(count, 0);
        assert!(diagnostics.iter().any(|d| d.kind == DiagnosticKind::NoTasks));
    }

    #[test]
    fn test_validate_reports_precedence_problems() {
        let mut scenario = sample();
        scenario.tasks.push(TaskInput::new("C", 5.0).with_predecessors("Z"));
        let (_, diagnostics) = validate_scenario(&scenario);
        assert!(diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::DanglingPredecessor));
    }

    #[test]
    fn test_export_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            demand: Some(240.0),
            ..no_overrides()
        };

        let path = export_scenario(&sample(), &overrides, " Night Shift ", dir.path()).unwrap();
        assert_eq!(path, dir.path().join("night_shift.json"));

        let written = Scenario::read_from(&path).unwrap();
        assert_eq!(written.meta.note, "Night Shift");
        assert!(written.meta.saved_at.is_some());
        assert!((written.params.demand_per_period - 240.0).abs() < 1e-10);
        assert!((written.params.default_allowance_percent - 10.0).abs() < 1e-10);
        assert_eq!(written.tasks, sample().tasks);
    }

    #[test]
    fn test_export_blank_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_scenario(&sample(), &no_overrides(), "", dir.path()).unwrap();
        assert_eq!(path, dir.path().join("escenario.json"));
        assert!(Scenario::read_from(&path).unwrap().meta.note.is_empty());
    }

    #[test]
    fn test_export_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(export_scenario(&sample(), &no_overrides(), "x", &missing).is_err());
    }
}
