//! End-to-end runs from scenario JSON.

use std::collections::HashMap;
use std::path::PathBuf;

use u_linebalance::engine::LineBalancer;
use u_linebalance::logging;
use u_linebalance::models::{LineParameters, Scenario, TaskInput};
use u_linebalance::validation::DiagnosticKind;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios/sewing-line.json")
}

#[test]
fn test_sewing_line_scenario() {
    logging::init_test();
    let scenario = Scenario::read_from(sample_path()).unwrap();
    let (params, inputs) = scenario.to_inputs();
    let report = LineBalancer::new().recalculate(&params, &inputs);

    assert!(!report.is_blocking_error, "{:?}", report.messages());
    assert!((report.cycle_time - 72.0).abs() < 1e-10);
    // The blank spare row is ignored.
    assert_eq!(report.tasks.len(), 9);
    assert_eq!(report.theoretical_min_stations, 5);
    assert!(report.stations.len() >= report.theoretical_min_stations);
    assert!(!report.is_under_provisioned());

    // OP10 is the mean of three samples with the 12% default allowance.
    let op10 = report.task("OP10").unwrap();
    assert!((op10.observed_time - 119.0 / 3.0).abs() < 1e-10);
    assert!((op10.standard_time - 119.0 / 3.0 * 1.12).abs() < 1e-10);
    // OP80 is audited one cycle in four.
    assert!((report.task("OP80").unwrap().standard_time - 16.8).abs() < 1e-10);

    // Ids are sequential and no station runs over takt.
    for (i, station) in report.stations.iter().enumerate() {
        assert_eq!(station.id, i + 1);
        assert!(station.time <= report.cycle_time + 1e-9);
    }

    // Every task is placed, never ahead of its predecessors.
    let station_of: HashMap<&str, usize> = report
        .tasks
        .iter()
        .map(|t| (t.code.as_str(), t.station.unwrap()))
        .collect();
    for task in &report.tasks {
        for pred in &task.predecessors {
            assert!(station_of[pred.as_str()] <= station_of[task.code.as_str()]);
        }
    }

    // KPI work content matches the standard-time total.
    assert!((report.kpis.total_work_content - report.total_work_content).abs() < 1e-9);
}

#[test]
fn test_round_trip_preserves_results() {
    let scenario = Scenario::read_from(sample_path()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let copy = dir.path().join("copy.json");
    scenario.write_to(&copy).unwrap();

    let reloaded = Scenario::read_from(&copy).unwrap();
    assert_eq!(reloaded, scenario);

    let engine = LineBalancer::new();
    let (p1, i1) = scenario.to_inputs();
    let (p2, i2) = reloaded.to_inputs();
    assert_eq!(engine.recalculate(&p1, &i1), engine.recalculate(&p2, &i2));
}

#[test]
fn test_efficiency_example() {
    // A = 50 s + 10% = 55, B = "20, 25" averaged + 20% = 27 → 82 s of work
    let params = LineParameters::new(480.0, 480.0);
    let inputs = vec![
        TaskInput::new("A", 50.0).with_allowance(10.0),
        TaskInput::new("B", "20, 25").with_allowance(20.0).with_predecessors("A"),
    ];
    let report = LineBalancer::new().recalculate(&params, &inputs);

    assert!((report.total_work_content - 82.0).abs() < 1e-9);
    assert_eq!(report.theoretical_min_stations, 2);
    assert_eq!(report.stations.len(), 2);
    assert!((report.kpis.efficiency_percent - 82.0 / 120.0 * 100.0).abs() < 1e-9);
}

#[test]
fn test_cyclic_scenario_from_json() {
    let json = r#"{
        "params": { "availableTimeMinutes": 480, "demandPerPeriod": 480 },
        "tasks": [
            { "code": "A", "observedTime": 10, "predecessors": "B" },
            { "code": "B", "observedTime": 10, "predecessors": "A" },
            { "code": "C", "observedTime": 5, "predecessors": "-" }
        ]
    }"#;
    let scenario = Scenario::from_json(json).unwrap();
    let (params, inputs) = scenario.to_inputs();
    let report = LineBalancer::new().recalculate(&params, &inputs);

    assert!(report.is_blocking_error);
    assert!(report.has(DiagnosticKind::Cycle));
    assert!(report.stations.is_empty());
    assert!((report.total_work_content - 25.0).abs() < 1e-10);
}

#[test]
fn test_malformed_numbers_fall_back() {
    let json = r#"{
        "params": { "availableTimeMinutes": 480, "demandPerPeriod": 480,
                    "defaultAllowancePercent": 10 },
        "tasks": [
            { "code": "A", "observedTime": "30s", "repetitionMultiplier": "x",
              "allowancePercent": "n/a", "frequencyPercent": "??" }
        ]
    }"#;
    let scenario = Scenario::from_json(json).unwrap();
    let (params, inputs) = scenario.to_inputs();
    let report = LineBalancer::new().recalculate(&params, &inputs);

    assert!(!report.is_blocking_error);
    let a = report.task("A").unwrap();
    assert!((a.observed_time - 30.0).abs() < 1e-10);
    // Malformed allowance is 0, not the line default.
    assert!((a.standard_time - 30.0).abs() < 1e-10);
}
