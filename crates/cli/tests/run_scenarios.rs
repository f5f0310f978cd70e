//! End-to-end tests driving the CLI entry point in memory.
//!
//! These tests cover configuration files, option ordering and the stdin
//! filter without spawning a process.

use std::fs;

use cli::run_with;
use cli::test_utils::parse_args;

fn run(args: &[&str], input: &str) -> (i32, String, String) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run_with(args.iter().copied(), input.as_bytes(), &mut stdout, &mut stderr);
    (
        code,
        String::from_utf8(stdout).unwrap(),
        String::from_utf8(stderr).unwrap(),
    )
}

// ============================================================================
// Argument Parsing
// ============================================================================

#[test]
fn test_forms_after_options_are_positional() {
    let args = parse_args(["formlog", "--explain", "net", "-f", "disk", "cpu"]).unwrap();
    assert_eq!(args.forms, ["net", "cpu"]);
    assert_eq!(args.directives, ["disk"]);
}

#[test]
fn test_disable_directive_is_not_an_option() {
    let args = parse_args(["formlog", "--form", "-net"]).unwrap();
    assert_eq!(args.directives, ["-net"]);
}

// ============================================================================
// Configuration File
// ============================================================================

#[test]
fn test_config_file_is_overridden_by_directives() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forms.json");
    fs::write(&path, r#"{"forms": {"net": false, "disk": false}}"#).unwrap();
    let path = path.to_str().unwrap();

    let (code, stdout, stderr) = run(&["formlog", "--config", path, "-f", "disk", "net", "disk"], "");

    assert_eq!(code, 0, "{stderr}");
    assert_eq!(stdout, "net: disabled\ndisk: enabled\n");
}

#[test]
fn test_malformed_config_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forms.json");
    fs::write(&path, "{ not json").unwrap();

    let (code, stdout, stderr) = run(&["formlog", "--config", path.to_str().unwrap(), "net"], "");

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("formlog: "));
    assert!(stderr.contains("forms.json"));
}

#[test]
fn test_reserved_form_key_in_config_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forms.json");
    fs::write(&path, r#"{"unspecified": true, "forms": {"unspecified": false}}"#).unwrap();

    let (code, stdout, stderr) = run(&["formlog", "--config", path.to_str().unwrap(), "net"], "");

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("reserved"), "{stderr}");
}

#[test]
fn test_missing_config_exits_with_two() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let (code, _, stderr) = run(&["formlog", "--config", path.to_str().unwrap(), "net"], "");

    assert_eq!(code, 2);
    assert!(stderr.contains("failed to read form configuration"));
}

// ============================================================================
// Categories
// ============================================================================

#[test]
fn test_category_redefinition_replaces_members() {
    let (_, stdout, _) = run(
        &["formlog", "-f", "-io", "-c", "io=net", "-c", "io=disk", "net", "disk"],
        "",
    );
    assert_eq!(stdout, "net: enabled\ndisk: disabled\n");
}

#[test]
fn test_add_types_extends_members() {
    let (_, stdout, _) = run(
        &["formlog", "-f", "-io", "-c", "io=net", "-a", "io=disk", "net", "disk"],
        "",
    );
    assert_eq!(stdout, "net: disabled\ndisk: disabled\n");
}

#[test]
fn test_unspecified_directive_changes_default() {
    let (_, stdout, _) = run(&["formlog", "-f", "unspecified=off", "-c", "io=net", "cpu", "io"], "");
    assert_eq!(stdout, "cpu: disabled\nio: enabled\n");
}

// ============================================================================
// Output Modes
// ============================================================================

#[test]
fn test_forms_are_reported_before_filtered_input() {
    let (code, stdout, _) = run(&["formlog", "--stdin", "-f", "-net", "net"], "net: a\nb\n");

    assert_eq!(code, 0);
    assert_eq!(stdout, "net: disabled\nb\n");
}

#[test]
fn test_off_suppresses_unprefixed_input() {
    let (_, stdout, _) = run(&["formlog", "--stdin", "--off"], "plain\ndisk: x\n");
    assert!(stdout.is_empty());
}

#[test]
fn test_no_forms_prints_effective_configuration() {
    let (code, stdout, _) = run(&["formlog", "-c", "io=net,disk", "-f", "-Net"], "");

    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["enabled"], true);
    assert_eq!(json["forms"]["net"], false);
    assert_eq!(json["categories"]["io"], serde_json::json!(["net", "disk"]));
}
