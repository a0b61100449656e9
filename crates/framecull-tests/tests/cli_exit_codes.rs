//! CLI exit codes and setup failure messages.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p framecull-tests --test cli_exit_codes
//! ```

use std::fs;

use framecull_tests::harness::{TestHarness, BLACK, WHITE};
use pretty_assertions::assert_eq;
use serde_json::json;

fn hd_spec(harness: &TestHarness) -> String {
    harness
        .write_spec(
            "hd.json",
            &json!({"name": "hd", "rules": [{"type": "size", "name": "s", "width": 1920, "height": 1080}]}),
        )
        .display()
        .to_string()
}

// ============================================================================
// Triage setup failures
// ============================================================================

#[test]
fn test_missing_source_exits_1() {
    let harness = TestHarness::new();
    let spec = hd_spec(&harness);

    let result = harness.run_cli(&["triage", "-s", &spec, "no-such-dir"]);
    result.assert_failure();
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("The specified source does not exist."));
    assert!(!harness.path().join("rejected").exists());
}

#[test]
fn test_source_file_exits_1() {
    let harness = TestHarness::new();
    let spec = hd_spec(&harness);
    let frame = harness.write_frame("frames", "a.png", 2, 2, WHITE);

    let result = harness.run_cli(&["triage", "-s", &spec, &frame.display().to_string()]);
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("The specified source is not a directory."));
}

#[test]
fn test_destination_file_exits_1() {
    let harness = TestHarness::new();
    let spec = hd_spec(&harness);
    harness.dir("frames");
    fs::write(harness.path().join("rejected"), "").unwrap();

    let result = harness.run_cli(&["triage", "-s", &spec, "frames"]);
    assert_eq!(result.exit_code, 1);
    assert!(result
        .stderr
        .contains("The specified destination is not a directory."));
}

#[test]
fn test_destination_missing_parents_exits_1() {
    let harness = TestHarness::new();
    let spec = hd_spec(&harness);
    harness.dir("frames");

    let result = harness.run_cli(&["triage", "-s", &spec, "frames", "--destination", "a/b/c"]);
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("missing parents"));
}

#[test]
fn test_missing_specification_exits_1() {
    let harness = TestHarness::new();
    harness.write_frame("frames", "a.png", 2, 2, BLACK);

    let result = harness.run_cli(&["triage", "-s", "missing.json", "frames"]);
    assert_eq!(result.exit_code, 1);
    assert!(result
        .stderr
        .contains("The specification file does not exist (missing.json)."));
    assert_eq!(harness.file_names("frames"), vec!["a.png"]);
}

#[test]
fn test_invalid_specification_exits_1_before_touching_frames() {
    let harness = TestHarness::new();
    let good = hd_spec(&harness);
    let bad = harness.write_spec(
        "bad.json",
        &json!({"name": "bad", "rules": [{"type": "pixel_colour", "name": "p", "x": 0, "y": 0, "colour": "blurple"}]}),
    );
    harness.write_frame("frames", "a.png", 2, 2, BLACK);

    let result = harness.run_cli(&[
        "triage",
        "-s",
        &good,
        "-s",
        &bad.display().to_string(),
        "frames",
    ]);
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("invalid rule"));
    assert_eq!(harness.file_names("frames"), vec!["a.png"]);
    assert!(harness.file_names("rejected").is_empty());
}

#[test]
fn test_setup_failure_json() {
    let harness = TestHarness::new();
    let spec = hd_spec(&harness);

    let result = harness.run_cli(&["triage", "-s", &spec, "no-such-dir", "--json"]);
    assert_eq!(result.exit_code, 1);
    let json = result.json();
    assert_eq!(json["success"], false);
    assert_eq!(json["errors"][0]["code"], "CLI_004");
}

#[test]
fn test_empty_source_completes() {
    let harness = TestHarness::new();
    let spec = hd_spec(&harness);
    harness.dir("frames");

    let result = harness.run_cli(&["triage", "-s", &spec, "frames"]);
    result.assert_success();
    assert_eq!(result.last_line(), "0 frame(s) rejected of 0 processed");
}

// ============================================================================
// check and validate
// ============================================================================

#[test]
fn test_check_exit_codes() {
    let harness = TestHarness::new();
    let spec = hd_spec(&harness);
    let small = harness.write_frame("frames", "small.png", 4, 4, WHITE);

    let rejected = harness.run_cli(&["check", "-s", &spec, &small.display().to_string()]);
    assert_eq!(rejected.exit_code, 1);
    assert!(rejected.stdout.contains("Size rule broken (s)"));

    let any = harness.write_spec("any.json", &json!({"name": "any", "rules": []}));
    let accepted = harness.run_cli(&[
        "check",
        "-s",
        &spec,
        "-s",
        &any.display().to_string(),
        &small.display().to_string(),
        "--json",
    ]);
    accepted.assert_success();
    let json = accepted.json();
    assert_eq!(json["verdict"]["accepted"], true);
    assert_eq!(json["verdict"]["matched_specification"], "any");
    assert_eq!(json["width"], 4);
}

#[test]
fn test_check_unreadable_frame_exits_1() {
    let harness = TestHarness::new();
    let spec = hd_spec(&harness);
    fs::write(harness.path().join("frame.png"), "garbage").unwrap();

    let result = harness.run_cli(&["check", "-s", &spec, "frame.png"]);
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("Failed to open frame"));
}

#[test]
fn test_validate_exit_codes() {
    let harness = TestHarness::new();
    let good = hd_spec(&harness);
    let zero = harness.write_spec(
        "zero.json",
        &json!({"name": "zero", "rules": [{"type": "size", "name": "s", "width": 0, "height": 0}]}),
    );

    harness.run_cli(&["validate", "-s", &good]).assert_success();

    let result = harness.run_cli(&["validate", "-s", &good, "-s", &zero.display().to_string(), "--json"]);
    assert_eq!(result.exit_code, 1);
    let json = result.json();
    assert_eq!(json["success"], false);
    assert_eq!(json["files"][0]["ok"], true);
    assert_eq!(json["files"][1]["errors"][0]["code"], "E003");
}
