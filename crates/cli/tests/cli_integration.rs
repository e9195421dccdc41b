//! CLI integration tests for all subcommands.
//!
//! Uses `assert_cmd` to spawn the `mirath` binary and verify
//! exit codes, stdout content, and stderr content.
//!
//! All tests set `current_dir` to the workspace root so that relative
//! paths to the `cases/` fixtures resolve correctly.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

/// Helper: create a Command for the `mirath` binary, rooted at workspace.
fn mirath() -> Command {
    let mut cmd = cargo_bin_cmd!("mirath");
    cmd.current_dir(workspace_root());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("run mirath");
    assert!(output.status.success(), "mirath failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    mirath()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Mirath estate distribution calculator",
        ));
}

#[test]
fn version_exits_0() {
    mirath()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mirath"));
}

// ──────────────────────────────────────────────
// 2. Distribute subcommand
// ──────────────────────────────────────────────

#[test]
fn distribute_text_report() {
    mirath()
        .args(["distribute", "cases/wife_son_daughter.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Estate value: 1,200,000.00 DA"))
        .stdout(predicate::str::contains("Amount: 150,000.00 DA (12.50%)"))
        .stdout(predicate::str::contains("700,000.00 DA"))
        .stdout(predicate::str::contains("350,000.00 DA"))
        .stdout(predicate::str::contains("Total allocated: 1,200,000.00 DA"))
        .stdout(predicate::str::contains("Warning").not());
}

#[test]
fn distribute_json_report() {
    let json = stdout_json(mirath().args([
        "--output",
        "json",
        "distribute",
        "cases/wife_son_daughter.json",
    ]));
    let records = json["records"].as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["relation"], "wife");
    assert_eq!(records[0]["amount"], "150000");
    assert_eq!(records[1]["amount"], "700000");
    assert_eq!(records[2]["amount"], "350000");
    assert_eq!(json["total_allocated"], "1200000");
    assert!(json["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn distribute_reports_under_allocation_but_succeeds() {
    let json = stdout_json(mirath().args([
        "--output",
        "json",
        "distribute",
        "cases/sole_husband.json",
    ]));
    assert_eq!(json["records"][0]["share"], "1/2");
    assert_eq!(json["warnings"][0]["kind"], "under_allocation");
    assert_eq!(json["warnings"][0]["amount"], "300000");
}

#[test]
fn distribute_with_fixed_daughter_config() {
    let dir = TempDir::new().unwrap();
    let config = write_file(
        &dir,
        "mirath.toml",
        "[engine]\ndaughters_without_son = \"fixed\"\n",
    );
    let json = stdout_json(mirath().args([
        "--output",
        "json",
        "--config",
        config.to_str().unwrap(),
        "distribute",
        "cases/parents_and_daughter.json",
    ]));
    assert_eq!(json["records"][2]["relation"], "daughter");
    assert_eq!(json["records"][2]["amount"], "450000");
    assert_eq!(json["unallocated"], "150000");
}

#[test]
fn distribute_in_arabic_with_currency_override() {
    mirath()
        .args([
            "--lang",
            "ar",
            "--currency",
            "EUR",
            "distribute",
            "cases/sole_husband.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("الأساس الشرعي"))
        .stdout(predicate::str::contains("300,000.00 EUR"));
}

#[test]
fn distribute_quiet_prints_nothing() {
    mirath()
        .args(["--quiet", "distribute", "cases/wife_son_daughter.json"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn distribute_unknown_relation_exits_1() {
    mirath()
        .args(["distribute", "cases/unknown_relation.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown relation code 'cousin'"));
}

#[test]
fn distribute_error_as_json() {
    mirath()
        .args(["--output", "json", "distribute", "cases/unknown_relation.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error\""));
}

#[test]
fn distribute_missing_file_exits_1() {
    mirath()
        .args(["distribute", "cases/does_not_exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error reading case file"));
}

#[test]
fn distribute_invalid_json_exits_1() {
    let dir = TempDir::new().unwrap();
    let case = write_file(&dir, "broken.json", "{ not json");
    mirath()
        .args(["distribute", case.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn distribute_rejects_zero_estate() {
    let dir = TempDir::new().unwrap();
    let case = write_file(
        &dir,
        "zero.json",
        r#"{ "deceased_sex": "male", "estate_value": "0", "heirs": [ { "relation": "son" } ] }"#,
    );
    mirath()
        .args(["distribute", case.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid estate value"));
}

// ──────────────────────────────────────────────
// 3. Validate subcommand
// ──────────────────────────────────────────────

#[test]
fn validate_valid_case() {
    mirath()
        .args(["validate", "cases/wife_son_daughter.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid (3 heir entries)"))
        .stdout(predicate::str::contains("#0 Wife x1"));
}

#[test]
fn validate_merges_duplicates_by_default() {
    let dir = TempDir::new().unwrap();
    let case = write_file(
        &dir,
        "dup.json",
        r#"{ "deceased_sex": "male", "estate_value": "10",
             "heirs": [ { "relation": "son", "count": 1 }, { "relation": "son", "count": 2 } ] }"#,
    );
    let json = stdout_json(mirath().args(["--output", "json", "validate", case.to_str().unwrap()]));
    assert_eq!(json["valid"], true);
    assert_eq!(json["case"]["entries"].as_array().unwrap().len(), 1);
    assert_eq!(json["case"]["entries"][0]["count"], 3);
}

#[test]
fn validate_rejects_duplicates_when_configured() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "mirath.toml", "[engine]\nduplicate_entries = \"reject\"\n");
    let case = write_file(
        &dir,
        "dup.json",
        r#"{ "deceased_sex": "male", "estate_value": "10",
             "heirs": [ { "relation": "son" }, { "relation": "son" } ] }"#,
    );
    mirath()
        .args([
            "--config",
            config.to_str().unwrap(),
            "validate",
            case.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than one heir entry"));
}

#[test]
fn bad_config_exits_1() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "mirath.toml", "language = \"klingon\"\n");
    mirath()
        .args([
            "--config",
            config.to_str().unwrap(),
            "validate",
            "cases/wife_son_daughter.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error parsing config"));
}

// ──────────────────────────────────────────────
// 4. Relations subcommand
// ──────────────────────────────────────────────

#[test]
fn relations_text_grouped_by_kinship() {
    mirath()
        .arg("relations")
        .assert()
        .success()
        .stdout(predicate::str::contains("Siblings:"))
        .stdout(predicate::str::contains("half_brother"));
}

#[test]
fn relations_json_lists_registry() {
    let json = stdout_json(mirath().args(["--output", "json", "relations"]));
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0]["code"], "son");
    assert_eq!(rows[5]["max_count"], 4);
}
