//! Integration tests for CLI output
//!
//! These run the built `footflow` binary against a small data directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn footflow_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove 'deps' directory
    path.push("footflow");
    path
}

const BOUNDARY: &str = r#"{"type":"FeatureCollection","features":[{"type":"Feature",
    "geometry":{"type":"Polygon","coordinates":[[[-1.2,53.9],[-1.0,53.9],[-1.0,54.1],[-1.2,54.1],[-1.2,53.9]]]},
    "properties":{"name":"York"}}]}"#;

const BUS: &str = r#"{"type":"FeatureCollection","features":[{"type":"Feature",
    "geometry":{"type":"Point","coordinates":[-1.09,53.96]},
    "properties":{"stop_name":"Rougier Street","stop_lat":53.96,"stop_lon":-1.09,
        "weekly_demand":80,"daily_demand":11,"hourly_demand":1}}]}"#;

fn york_data() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let york = dir.path().join("York");
    fs::create_dir_all(&york).unwrap();
    fs::write(york.join("boundary.geojson"), BOUNDARY).unwrap();
    fs::write(york.join("bus_demands.geojson"), BUS).unwrap();
    dir
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(footflow_bin())
        .current_dir(dir)
        .env_remove("FOOTFLOW_DATA_DIR")
        .env_remove("FOOTFLOW_FEEDBACK_PATH")
        .env_remove("FOOTFLOW_CLASSIFICATION")
        .env_remove("FOOTFLOW_VIEWPORT")
        .args(["--data-dir", dir.to_str().unwrap()])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn json_stdout(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

#[test]
fn test_catalog_json_lists_authorities_and_demands() {
    let dir = york_data();
    let output = run(dir.path(), &["catalog", "--json"]);

    assert!(output.status.success(), "Command should succeed");
    let parsed = json_stdout(&output);
    assert_eq!(parsed["status"], "success");
    assert_eq!(parsed["data"]["authorities"].as_array().unwrap().len(), 11);
    assert_eq!(parsed["data"]["demands"][0]["filename"], "bus_demands");
    let rail_notes = parsed["data"]["demands"][2]["description"].as_array().unwrap();
    assert!(rail_notes[0].as_str().unwrap().contains("5-year rolling average"));
}

#[test]
fn test_catalog_prints_methodology_notes() {
    let dir = york_data();
    let output = run(dir.path(), &["catalog"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Ofsted records"));
    assert!(stdout.contains("it may take about 45 seconds to load"));
}

#[test]
fn test_catalog_availability_for_authority() {
    let dir = york_data();
    let output = run(dir.path(), &["catalog", "--authority", "york", "--json"]);

    assert!(output.status.success());
    let data = &json_stdout(&output)["data"];
    assert_eq!(data["authority"], "York");
    assert_eq!(data["categories"][0]["available"], true);
    assert_eq!(data["categories"][1]["available"], false);
}

#[test]
fn test_resolve_missing_dataset_reports_no_data() {
    let dir = york_data();
    let output = run(dir.path(), &["resolve", "--authority", "York", "--demand", "rail", "--json"]);

    assert!(output.status.success(), "No data is not a failure");
    assert_eq!(
        json_stdout(&output)["data"]["message"],
        "No data found for the selected Local Authority and Demand"
    );
}

#[test]
fn test_render_writes_map_file() {
    let dir = york_data();
    let map_path = dir.path().join("out").join("york_bus.json");
    let output = run(
        dir.path(),
        &[
            "render",
            "--authority",
            "York",
            "--demand",
            "Bus demand",
            "--output",
            map_path.to_str().unwrap(),
            "--json",
        ],
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let summary = json_stdout(&output);
    assert_eq!(summary["data"]["layers"].as_array().unwrap().len(), 2);

    let map: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&map_path).unwrap()).unwrap();
    assert_eq!(map["layers"][1]["features"]["features"][0]["properties"]["radius"], 2.0);
}

#[test]
fn test_unknown_authority_fails() {
    let dir = york_data();
    let output = run(dir.path(), &["resolve", "--authority", "Atlantis", "--demand", "bus"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown local authority"));
}

#[test]
fn test_feedback_appends_to_log() {
    let dir = york_data();
    let log = dir.path().join("feedback.csv");
    let log_arg = log.to_str().unwrap();

    for comment in ["First", "Second"] {
        let output = run(
            dir.path(),
            &[
                "feedback",
                "--name",
                "Ada",
                "--email",
                "ada@example.org",
                "--comments",
                comment,
                "--log",
                log_arg,
            ],
        );
        assert!(output.status.success());
    }

    let content = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec!["Name,Email,Comments", "Ada,ada@example.org,First", "Ada,ada@example.org,Second"]
    );
}

#[test]
fn test_incomplete_feedback_writes_nothing() {
    let dir = york_data();
    let log = dir.path().join("feedback.csv");
    let output = run(dir.path(), &["feedback", "--name", "Ada", "--log", log.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Please fill in all fields"));
    assert!(!log.exists());
}
