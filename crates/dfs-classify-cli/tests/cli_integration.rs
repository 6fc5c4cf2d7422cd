//! Integration tests for the dfsc CLI.
//!
//! Every run points `DFSC_CONFIG` at a temp file and clears the other
//! `DFSC_*` variables so the user's own configuration never leaks in.
//!
//! Run with: `cargo test --package dfs-classify-cli --test cli_integration`

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const SCENARIO_C: &str = "u->v; u->x; v->y; y->x; x->v; w->y; w->z";

fn dfsc(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dfsc"));
    cmd.current_dir(home)
        .env("DFSC_CONFIG", home.join("config.json"))
        .env_remove("DFSC_ENGINE")
        .env_remove("DFSC_CLOCK_BASE")
        .env_remove("DFSC_FORMAT")
        .env_remove("DFSC_SEED")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to run dfsc with given arguments in an isolated config home.
fn run_dfsc(home: &Path, args: &[&str]) -> Output {
    dfsc(home)
        .args(args)
        .output()
        .expect("Failed to execute dfsc command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "dfsc failed\nstdout: {}\nstderr: {}",
        stdout(output),
        stderr(output)
    );
}

// =============================================================================
// Basic CLI tests
// =============================================================================

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    let output = run_dfsc(home.path(), &["--help"]);
    assert_success(&output);

    let text = stdout(&output);
    assert!(text.contains("classify"));
    assert!(text.contains("random"));
    assert!(text.contains("compare"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    let output = run_dfsc(home.path(), &["--version"]);
    assert_success(&output);
    assert!(stdout(&output).contains("dfsc"));
}

// =============================================================================
// Classify
// =============================================================================

#[test]
fn test_classify_inline_text() {
    let home = TempDir::new().unwrap();
    let output = run_dfsc(home.path(), &["classify", "--edges", SCENARIO_C]);
    assert_success(&output);

    let text = stdout(&output);
    assert!(text.contains("u -> v  tree"));
    assert!(text.contains("x -> v  back"));
    assert!(text.contains("u -> x  forward"));
    assert!(text.contains("w -> y  cross"));
    assert!(text.contains("Counts: tree=4 back=1 forward=1 cross=1"));
    assert!(text.contains("Cycle: yes"));
    assert!(text.contains("Finish Order: x y v u z w"));
}

#[test]
fn test_classify_json_output() {
    let home = TempDir::new().unwrap();
    let output = run_dfsc(
        home.path(),
        &["classify", "--edges", "0->1; 1->2; 2->3; 3->1", "--format", "json"],
    );
    assert_success(&output);

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["engine"], "iterative");
    assert_eq!(value["report"]["has_cycle"], true);
    assert_eq!(value["report"]["counts"]["back"], 1);
    assert_eq!(value["report"]["counts"]["tree"], 3);
}

#[test]
fn test_engines_print_same_json() {
    let home = TempDir::new().unwrap();
    let report = |engine: &str| {
        let output = run_dfsc(
            home.path(),
            &["classify", "--edges", SCENARIO_C, "--format", "json", "--engine", engine],
        );
        assert_success(&output);
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        value["report"].clone()
    };

    assert_eq!(report("recursive"), report("iterative"));
}

#[test]
fn test_classify_file_input() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("graph.txt");
    fs::write(&path, "# scenario B\n0 1\n1 2\n2 3\n3 0\n").unwrap();

    let output = run_dfsc(home.path(), &["classify", "--file", path.to_str().unwrap()]);
    assert_success(&output);
    assert!(stdout(&output).contains("3 -> 0  back"));
}

#[test]
fn test_classify_json_input_from_stdin() {
    let home = TempDir::new().unwrap();
    let mut child = dfsc(home.path())
        .args(["classify", "--json", "--format", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn dfsc");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"{"edges": [["a", "b"], ["b", "a"]]}"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert_success(&output);

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["report"]["counts"]["back"], 1);
}

#[test]
fn test_classify_numeric_json_from_stdin() {
    let home = TempDir::new().unwrap();
    let mut child = dfsc(home.path())
        .args(["classify", "--json", "--format", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn dfsc");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"[[0, 1], [1, 0]]")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert_success(&output);

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["report"]["counts"]["tree"], 1);
    assert_eq!(value["report"]["counts"]["back"], 1);
    assert_eq!(value["report"]["order"], serde_json::json!(["1", "0"]));
}

#[test]
fn test_dag_json_output_feeds_back_as_input() {
    let home = TempDir::new().unwrap();
    let output = run_dfsc(
        home.path(),
        &["dag", "--edges", "0->1; 1->2; 2->0", "--format", "json"],
    );
    assert_success(&output);
    let path = home.path().join("dag.json");
    fs::write(&path, &output.stdout).unwrap();

    let output = run_dfsc(
        home.path(),
        &["classify", "--json", "--file", path.to_str().unwrap()],
    );
    assert_success(&output);
    assert!(stdout(&output).contains("Cycle: no"));
}

#[test]
fn test_clock_base_too_large_is_rejected() {
    let home = TempDir::new().unwrap();
    let huge = (u64::MAX - 1).to_string();

    let output = run_dfsc(home.path(), &["classify", "--edges", "0->1", "--clock-base", &huge]);
    assert!(!output.status.success());

    let output = run_dfsc(home.path(), &["config", "set", "clock-base", &huge]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("too large"));

    let output = dfsc(home.path())
        .env("DFSC_CLOCK_BASE", &huge)
        .args(["classify", "--edges", "0->1"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("too large"));
}

#[test]
fn test_clock_base_flag() {
    let home = TempDir::new().unwrap();
    let output = run_dfsc(
        home.path(),
        &["classify", "--edges", "a->b", "--clock-base", "0", "--format", "json"],
    );
    assert_success(&output);

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let vertices = value["report"]["vertices"].as_array().unwrap();
    assert_eq!(vertices[0]["start"], 0);
    assert_eq!(vertices[0]["finish"], 3);
}

#[test]
fn test_matrix_flag() {
    let home = TempDir::new().unwrap();
    let output = run_dfsc(home.path(), &["classify", "--edges", "0->1", "--matrix"]);
    assert_success(&output);
    assert!(stdout(&output).contains("Adjacency Matrix:"));
}

#[test]
fn test_bad_format_fails() {
    let home = TempDir::new().unwrap();
    let output = run_dfsc(home.path(), &["classify", "--edges", "0->1", "--format", "yaml"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown format"));
}

#[test]
fn test_malformed_edge_list_fails() {
    let home = TempDir::new().unwrap();
    let output = run_dfsc(home.path(), &["classify", "--edges", "0 1 2"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("line 1"));
}

#[test]
fn test_missing_file_fails() {
    let home = TempDir::new().unwrap();
    let output = run_dfsc(home.path(), &["classify", "--file", "nope.txt"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to read edge list"));
}

// =============================================================================
// Random
// =============================================================================

#[test]
fn test_random_with_seed_is_reproducible() {
    let home = TempDir::new().unwrap();
    let args = ["random", "--vertices", "12", "--edges", "20", "--seed", "42", "--format", "json"];

    let first = run_dfsc(home.path(), &args);
    let second = run_dfsc(home.path(), &args);
    assert_success(&first);
    assert_eq!(first.stdout, second.stdout);

    let value: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
    assert_eq!(value["seed"], 42);
    assert_eq!(value["report"]["edges"].as_array().unwrap().len(), 20);
}

#[test]
fn test_random_prints_seed() {
    let home = TempDir::new().unwrap();
    let output = run_dfsc(home.path(), &["random", "--vertices", "5"]);
    assert_success(&output);
    assert!(stdout(&output).starts_with("Seed: "));
}

// =============================================================================
// Dag and compare
// =============================================================================

#[test]
fn test_dag_removes_back_edges() {
    let home = TempDir::new().unwrap();
    let output = run_dfsc(
        home.path(),
        &["dag", "--edges", "0->1; 1->2; 2->0", "--format", "json"],
    );
    assert_success(&output);

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["removed"], serde_json::json!([["2", "0"]]));
    assert_eq!(value["edges"], serde_json::json!([["0", "1"], ["1", "2"]]));
}

#[test]
fn test_dag_text() {
    let home = TempDir::new().unwrap();
    let output = run_dfsc(home.path(), &["dag", "--edges", "0->1; 1->0"]);
    assert_success(&output);

    let text = stdout(&output);
    assert!(text.contains("Removed back edges:\n1 -> 0"));
}

#[test]
fn test_compare_agrees() {
    let home = TempDir::new().unwrap();
    let output = run_dfsc(home.path(), &["compare", "--edges", SCENARIO_C]);
    assert_success(&output);
    assert_eq!(stdout(&output), "engines agree: 6 vertices, 7 edges\n");
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_config_path_honours_env() {
    let home = TempDir::new().unwrap();
    let output = run_dfsc(home.path(), &["config", "path"]);
    assert_success(&output);
    assert_eq!(
        stdout(&output).trim(),
        home.path().join("config.json").display().to_string()
    );
}

#[test]
fn test_config_set_get_reset() {
    let home = TempDir::new().unwrap();

    let output = run_dfsc(home.path(), &["config", "set", "engine", "recursive"]);
    assert_success(&output);
    assert!(home.path().join("config.json").exists());

    let output = run_dfsc(home.path(), &["config", "get", "engine"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "recursive");

    let output = run_dfsc(home.path(), &["classify", "--edges", "0->1", "--format", "json"]);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["engine"], "recursive");

    assert_success(&run_dfsc(home.path(), &["config", "reset"]));
    let output = run_dfsc(home.path(), &["config", "get", "engine"]);
    assert_eq!(stdout(&output).trim(), "iterative");
}

#[test]
fn test_config_unknown_key_fails() {
    let home = TempDir::new().unwrap();
    let output = run_dfsc(home.path(), &["config", "set", "colour", "blue"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown config key"));
}

#[test]
fn test_format_from_env() {
    let home = TempDir::new().unwrap();
    let output = dfsc(home.path())
        .env("DFSC_FORMAT", "json")
        .args(["classify", "--edges", "0->1"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(serde_json::from_slice::<serde_json::Value>(&output.stdout).is_ok());
}
