//! CLI Integration Tests
//!
//! Runs the `konversi` binary with assert_cmd.

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

fn konversi() -> Command {
    let mut cmd = Command::cargo_bin("konversi").unwrap();
    cmd.env_remove("KONVERSI_MIN").env_remove("KONVERSI_MAX");
    cmd
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    konversi()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("konversi"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    konversi()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ═══════════════════════════════════════════════════════════════════════════
// CONVERT TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_convert_with_range() {
    konversi()
        .args(["convert", "0, 50, 100", "--min", "0", "--max", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0, 5, 10"));
}

#[test]
fn test_convert_default_range() {
    konversi()
        .args(["convert", "1, 2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("85, 95"));
}

#[test]
fn test_convert_range_from_env() {
    konversi()
        .env("KONVERSI_MIN", "1")
        .env("KONVERSI_MAX", "3")
        .args(["convert", "10, 20, 30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1, 2, 3"));
}

#[test]
fn test_convert_verbose_reports_skipped() {
    konversi()
        .args(["convert", "1, x, 3", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed 2 of 3"))
        .stdout(predicate::str::contains("[1]"));
}

#[test]
fn test_convert_without_numbers_fails() {
    konversi()
        .args(["convert", "a, b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidInput"));
}

#[test]
fn test_convert_inverted_range_fails() {
    konversi()
        .args(["convert", "1, 2", "--min", "95", "--max", "85"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidRange"));
}

// ═══════════════════════════════════════════════════════════════════════════
// WORKBOOK TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_template_then_import_empty() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template_upload.xlsx");

    konversi()
        .args(["template", template.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Template written"));
    assert!(template.exists());

    konversi()
        .args(["import", template.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 records"));
}

#[test]
fn test_import_then_process_records_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("nilai.xlsx");
    let records = temp_dir.path().join("records.json");
    let output = temp_dir.path().join("hasil_konversi.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("XII MIPA 1").unwrap();
    sheet.write_string(0, 0, "Nama Lengkap").unwrap();
    sheet.write_string(0, 1, "Angka Acak").unwrap();
    sheet.write_string(1, 0, "Andi").unwrap();
    sheet.write_number(1, 1, 10.0).unwrap();
    sheet.write_string(2, 0, "Budi").unwrap();
    sheet.write_number(2, 1, 30.0).unwrap();
    workbook.save(&input).unwrap();

    konversi()
        .args(["import", input.to_str().unwrap(), records.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("XII MIPA 1"))
        .stdout(predicate::str::contains("2 records"));

    let dump = std::fs::read_to_string(&records).unwrap();
    assert!(dump.contains("\"label\": \"Budi\""));

    konversi()
        .args([
            "process",
            records.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Export Complete"))
        .stdout(predicate::str::contains("85, 95"));
    assert!(output.exists());
}

#[test]
fn test_process_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.xlsx");

    konversi()
        .args(["process", missing.to_str().unwrap()])
        .current_dir(temp_dir.path())
        .assert()
        .failure();
    assert!(!temp_dir.path().join("hasil_konversi.xlsx").exists());
}
