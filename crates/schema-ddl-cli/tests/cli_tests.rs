//! CLI integration tests for schema-ddl.
//!
//! These tests verify argument parsing, script output and exit codes for
//! the error conditions the binary distinguishes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get a command for the schema-ddl binary.
fn cmd() -> Command {
    Command::cargo_bin("schema-ddl").unwrap()
}

fn yaml_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

const PRIORITY_GROUPS: &str = r#"
dialect: exasol
changes:
  - action: create
    object: { kind: priority_group, name: BATCH, weight: 5, description: nightly jobs }
  - action: modify
    object: { kind: priority_group, name: BATCH, weight: 10 }
    changes: { weight: 10 }
"#;

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("translators"))
        .stdout(predicate::str::contains("check-config"));
}

#[test]
fn test_global_flags_in_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--dialect"))
        .stdout(predicate::str::contains("--output-json"))
        .stdout(predicate::str::contains("--log-format"))
        .stdout(predicate::str::contains("--verbosity"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("schema-ddl"));
}

#[test]
fn test_no_subcommand_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// =============================================================================
// Generate Tests
// =============================================================================

#[test]
fn test_generate_prints_script() {
    let changes = yaml_file(PRIORITY_GROUPS);
    cmd()
        .arg("generate")
        .arg(changes.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("-- Dialect: exasol"))
        .stdout(predicate::str::contains("-- Config hash: "))
        .stdout(predicate::str::contains(
            "-- Create priority group\nCREATE PRIORITY GROUP BATCH WITH WEIGHT = 5;",
        ))
        .stdout(predicate::str::contains(
            "COMMENT ON PRIORITY GROUP BATCH is 'nightly jobs';",
        ))
        .stdout(predicate::str::contains(
            "ALTER PRIORITY GROUP BATCH SET WEIGHT = 10;",
        ));
}

#[test]
fn test_generate_output_json() {
    let changes = yaml_file(PRIORITY_GROUPS);
    let output = cmd()
        .arg("--output-json")
        .arg("generate")
        .arg(changes.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["dialect"], "exasol");
    assert_eq!(json["success"], true);
    assert_eq!(json["statements"][0]["kind"], "create");
    assert_eq!(json["statements"][1]["kind"], "comment");
    assert_eq!(json["outcomes"][1]["state"], "emitted");
    assert_eq!(json["checksum"].as_str().unwrap().len(), 64);
}

#[test]
fn test_dialect_flag_overrides_change_file() {
    let changes = yaml_file(
        r#"
dialect: postgres
changes:
  - action: create
    object: { kind: table, schema: public, name: events, distribution: randomly }
"#,
    );
    cmd()
        .args(["--dialect", "greenplum", "generate"])
        .arg(changes.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "CREATE TABLE public.events () DISTRIBUTED RANDOMLY;",
        ));
}

#[test]
fn test_config_supplies_dialect_and_options() {
    let config = yaml_file("dialect: postgres\noptions:\n  cascade_on_delete: true\n");
    let changes = yaml_file(
        r#"
changes:
  - action: delete
    object: { kind: table, schema: public, name: orders }
"#,
    );
    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("generate")
        .arg(changes.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DROP TABLE public.orders CASCADE;"));
}

#[test]
fn test_failed_change_sets_exit_code() {
    let changes = yaml_file(
        r#"
dialect: exasol
changes:
  - action: create
    object: { kind: priority_group, name: BATCH, weight: 0 }
  - action: create
    object: { kind: priority_group, name: OLTP, weight: 50 }
"#,
    );
    cmd()
        .arg("generate")
        .arg(changes.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("CREATE PRIORITY GROUP OLTP WITH WEIGHT = 50;"))
        .stderr(predicate::str::contains("1 of 2 changes failed"));
}

#[test]
fn test_partition_warning_in_script_header() {
    let changes = yaml_file(
        r#"
dialect: postgres
changes:
  - action: create
    object:
      kind: partition
      table: { schema: public, name: orders_2024 }
      parents: []
      bound: FOR VALUES FROM (2024) TO (2025)
"#,
    );
    cmd()
        .arg("generate")
        .arg(changes.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("-- Warning: public.orders_2024"))
        .stdout(predicate::str::contains("PARTITION OF  FOR VALUES"));
}

// =============================================================================
// Exit Code Tests
// =============================================================================

#[test]
fn test_missing_change_file_exits_with_code_3() {
    cmd()
        .args(["generate", "/nonexistent/changes.yaml"])
        .assert()
        .code(3); // IO error
}

#[test]
fn test_invalid_change_file_exits_with_code_2() {
    let changes = yaml_file("changes: [");
    cmd()
        .arg("generate")
        .arg(changes.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("YAML error"));
}

#[test]
fn test_unknown_dialect_exits_with_code_2() {
    cmd()
        .args(["--dialect", "oracle", "translators"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown database dialect"));
}

#[test]
fn test_invalid_config_exits_with_code_2() {
    let config = yaml_file("dialect: sybase\n");
    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("check-config")
        .assert()
        .code(2);
}

// =============================================================================
// Translators and Config Tests
// =============================================================================

#[test]
fn test_translators_lists_builtins() {
    cmd()
        .arg("translators")
        .assert()
        .success()
        .stdout(predicate::str::contains("priority group"))
        .stdout(predicate::str::contains("greenplum"))
        .stdout(predicate::str::contains("mysql"));
}

#[test]
fn test_translators_filtered_by_dialect() {
    cmd()
        .args(["--dialect", "exasol", "translators"])
        .assert()
        .success()
        .stdout(predicate::str::contains("priority group"))
        .stdout(predicate::str::contains("postgres").not());
}

#[test]
fn test_check_config_prints_hash() {
    let config = yaml_file("dialect: gp\n");
    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Dialect: greenplum"))
        .stdout(predicate::str::contains("Hash: "));
}
