//! CLI integration tests for mooring.
//!
//! These tests run the binary against catalogs written to a temporary directory.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the mooring binary command.
fn mooring() -> Command {
    Command::cargo_bin("mooring").unwrap()
}

/// Run mooring inside `dir`, isolated from any user-wide configuration.
fn mooring_in(dir: &Path) -> Command {
    let mut cmd = mooring();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("HOME", dir)
        .env_remove("MOORING_CONFIG");
    cmd
}

/// Create a temporary directory for test catalogs.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

const VALID_CATALOG: &str = r#"
[[types]]
name = "CompileTask"
aliases = ["CompileTask_Decorated"]

[[types.properties]]
name = "sources"
type = "FileCollection"
markers = ["InputFiles", "SkipWhenEmpty"]
path-sensitivity = "relative"

[[types.properties]]
name = "level"
type = "Provider<int>"
markers = ["Input", "Optional"]

[[types.properties]]
name = "destination"
type = "Directory"
markers = ["OutputDirectory"]
"#;

const INVALID_CATALOG: &str = r#"
[[types]]
name = "Compile"

[[types.properties]]
name = "libs"
type = "FileCollection"

[[types.properties]]
name = "debug"
type = "boolean"
markers = ["Input", "Optional"]
"#;

fn write_catalog(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("types.toml");
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// mooring validate
// ============================================================================

#[test]
fn test_validate_valid_catalog() {
    let tmp = temp_dir();
    write_catalog(tmp.path(), VALID_CATALOG);

    mooring_in(tmp.path())
        .args(["validate", "types.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 type(s) valid for scheme tasks"));
}

#[test]
fn test_validate_reports_problems() {
    let tmp = temp_dir();
    write_catalog(tmp.path(), INVALID_CATALOG);

    mooring_in(tmp.path())
        .args(["validate", "types.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Type 'Compile' property 'libs' is missing an input or output marker.",
        ))
        .stderr(predicate::str::contains(
            "Type 'Compile' property 'debug' of type boolean shouldn't be marked as Optional.",
        ))
        .stderr(predicate::str::contains(
            "see validation_problems#missing_capability",
        ))
        .stderr(predicate::str::contains("found 2 problem(s) in 1 of 1 type(s)"));
}

#[test]
fn test_validate_transform_parameters_scheme() {
    let tmp = temp_dir();
    write_catalog(tmp.path(), INVALID_CATALOG);

    mooring_in(tmp.path())
        .args(["validate", "types.toml", "--scheme", "transform-parameters"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Type 'Compile' property 'libs' is missing an input marker.",
        ));
}

#[test]
fn test_validate_unknown_scheme() {
    let tmp = temp_dir();
    write_catalog(tmp.path(), VALID_CATALOG);

    mooring_in(tmp.path())
        .args(["validate", "types.toml", "--scheme", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid scheme: bogus"));
}

#[test]
fn test_validate_missing_catalog() {
    let tmp = temp_dir();

    mooring_in(tmp.path())
        .args(["validate", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load type catalog"));
}

#[test]
fn test_validate_malformed_catalog() {
    let tmp = temp_dir();
    write_catalog(tmp.path(), "[[types]]\nname = 42\n");

    mooring_in(tmp.path())
        .args(["validate", "types.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse type catalog"));
}

// ============================================================================
// configuration
// ============================================================================

#[test]
fn test_explicit_config_sets_documentation_base() {
    let tmp = temp_dir();
    write_catalog(tmp.path(), INVALID_CATALOG);
    fs::write(
        tmp.path().join("mooring.toml"),
        "[validation]\ndocumentation-base = \"https://docs.example.com/problems\"\n",
    )
    .unwrap();

    mooring_in(tmp.path())
        .args(["--config", "mooring.toml", "validate", "types.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "see https://docs.example.com/problems#missing_capability",
        ));
}

#[test]
fn test_project_config_is_picked_up() {
    let tmp = temp_dir();
    write_catalog(tmp.path(), INVALID_CATALOG);
    fs::create_dir_all(tmp.path().join(".mooring")).unwrap();
    fs::write(
        tmp.path().join(".mooring/config.toml"),
        "[store]\nmemoization = \"last-write-wins\"\n\n[validation]\ndocumentation-base = \"local-docs\"\n",
    )
    .unwrap();

    mooring_in(tmp.path())
        .args(["validate", "types.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("see local-docs#missing_capability"));
}

#[test]
fn test_explicit_config_missing_file() {
    let tmp = temp_dir();
    write_catalog(tmp.path(), VALID_CATALOG);

    mooring_in(tmp.path())
        .args(["--config", "nope.toml", "validate", "types.toml"])
        .assert()
        .failure();
}

// ============================================================================
// mooring describe
// ============================================================================

#[test]
fn test_describe_prints_roles_and_normalization() {
    let tmp = temp_dir();
    write_catalog(tmp.path(), VALID_CATALOG);

    mooring_in(tmp.path())
        .args(["describe", "types.toml", "CompileTask"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CompileTask (scheme: tasks)"))
        .stdout(predicate::str::contains("sources: InputFiles FileCollection"))
        .stdout(predicate::str::contains("destination: OutputDirectory Directory"))
        .stdout(predicate::str::contains("sources: relative-path"));
}

#[test]
fn test_describe_resolves_alias() {
    let tmp = temp_dir();
    write_catalog(tmp.path(), VALID_CATALOG);

    mooring_in(tmp.path())
        .args(["describe", "types.toml", "CompileTask_Decorated"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CompileTask (scheme: tasks)"));
}

#[test]
fn test_describe_json() {
    let tmp = temp_dir();
    write_catalog(tmp.path(), VALID_CATALOG);

    let output = mooring_in(tmp.path())
        .args(["describe", "types.toml", "CompileTask", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["type_name"], "CompileTask");
    assert_eq!(json["scheme"], "tasks");

    let properties = json["properties"].as_array().unwrap();
    assert_eq!(properties.len(), 3);
    let level = properties
        .iter()
        .find(|p| p["name"] == "level")
        .unwrap();
    assert_eq!(level["role"], "Input");
    assert_eq!(level["value_type"], "Provider<int>");
    assert!(json["problems"].as_array().unwrap().is_empty());
}

#[test]
fn test_describe_unknown_type() {
    let tmp = temp_dir();
    write_catalog(tmp.path(), VALID_CATALOG);

    mooring_in(tmp.path())
        .args(["describe", "types.toml", "LinkTask"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("type `LinkTask` is not declared"));
}
