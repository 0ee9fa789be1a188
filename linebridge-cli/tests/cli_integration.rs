//! Integration tests for the linebridge CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

#[test]
fn test_lines_normalizes_terminators_and_drops_partial_line() {
    let mut cmd = Command::cargo_bin("linebridge").unwrap();
    cmd.arg("lines").arg("-i").arg(fixture_path("people.csv"));

    cmd.assert()
        .success()
        .stdout("id,name\r\n1,ada\r\n2,grace\r\n3,linus\r\n");
}

#[test]
fn test_lines_cap() {
    let mut cmd = Command::cargo_bin("linebridge").unwrap();
    cmd.arg("lines")
        .arg("-i")
        .arg(fixture_path("people.csv"))
        .arg("-n")
        .arg("2")
        .arg("--block-kb")
        .arg("1");

    cmd.assert().success().stdout("id,name\r\n1,ada\r\n");
}

#[test]
fn test_lines_text_mode() {
    let mut cmd = Command::cargo_bin("linebridge").unwrap();
    cmd.arg("lines")
        .arg("-i")
        .arg(fixture_path("people.csv"))
        .arg("--text");

    cmd.assert()
        .success()
        .stdout("id,name\n1,ada\r\n2,grace\r3,linus\n4,unterminated");
}

#[test]
fn test_lines_from_stdin() {
    let mut cmd = Command::cargo_bin("linebridge").unwrap();
    cmd.arg("lines").arg("-i").arg("-").write_stdin("a\nb\nc");

    cmd.assert().success().stdout("a\r\nb\r\n");
}

#[test]
fn test_lines_with_encoding() {
    let mut cmd = Command::cargo_bin("linebridge").unwrap();
    cmd.arg("lines")
        .arg("-i")
        .arg(fixture_path("latin1.txt"))
        .arg("-e")
        .arg("latin1");

    cmd.assert().success().stdout("café\r\n");
}

#[test]
fn test_lines_config_file_and_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("linebridge.toml");
    let output = temp_dir.path().join("out.txt");
    fs::write(&config, "[lines]\nmax_lines = 1\n").unwrap();

    let mut cmd = Command::cargo_bin("linebridge").unwrap();
    cmd.arg("lines")
        .arg("-i")
        .arg(fixture_path("people.csv"))
        .arg("-c")
        .arg(&config)
        .arg("-o")
        .arg(&output);

    cmd.assert().success();
    assert_eq!(fs::read_to_string(&output).unwrap(), "id,name\r\n");
}

#[test]
fn test_lines_unknown_encoding() {
    let mut cmd = Command::cargo_bin("linebridge").unwrap();
    cmd.arg("lines")
        .arg("-i")
        .arg(fixture_path("people.csv"))
        .arg("-e")
        .arg("klingon");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown encoding label 'klingon'"));
}

#[test]
fn test_lines_missing_file() {
    let mut cmd = Command::cargo_bin("linebridge").unwrap();
    cmd.arg("lines").arg("-i").arg("nonexistent.txt");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input"));
}

#[test]
fn test_lines_rejects_oversized_block() {
    let mut cmd = Command::cargo_bin("linebridge").unwrap();
    cmd.arg("lines")
        .arg("-i")
        .arg(fixture_path("people.csv"))
        .arg("--block-kb")
        .arg("18014398509481984");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("block size of 18014398509481984 KiB is too large"));
}

#[test]
fn test_chunks_rejects_oversized_window() {
    let mut cmd = Command::cargo_bin("linebridge").unwrap();
    cmd.arg("chunks")
        .arg("-i")
        .arg(fixture_path("people.csv"))
        .arg("-w")
        .arg("18014398509481984")
        .arg("-q");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("window size"));
}

#[test]
fn test_verbose_logging_goes_to_stderr() {
    let mut cmd = Command::cargo_bin("linebridge").unwrap();
    cmd.env_remove("RUST_LOG")
        .arg("-v")
        .arg("lines")
        .arg("-i")
        .arg(fixture_path("people.csv"));

    cmd.assert()
        .success()
        .stdout("id,name\r\n1,ada\r\n2,grace\r\n3,linus\r\n")
        .stderr(predicate::str::contains("Reading lines from"));
}

#[test]
fn test_chunks_summary_and_copy() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("data.bin");
    let output = temp_dir.path().join("copy.bin");
    let data: Vec<u8> = (0..=255u8).cycle().take(5000).collect();
    fs::write(&input, &data).unwrap();

    let mut cmd = Command::cargo_bin("linebridge").unwrap();
    cmd.arg("chunks")
        .arg("-i")
        .arg(&input)
        .arg("-w")
        .arg("2")
        .arg("-o")
        .arg(&output)
        .arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Read 3 chunk(s), 5000 bytes"));
    assert_eq!(fs::read(&output).unwrap(), data);
}

#[test]
fn test_chunks_rejects_stdin() {
    let mut cmd = Command::cargo_bin("linebridge").unwrap();
    cmd.arg("chunks").arg("-i").arg("-").arg("-q");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot be read by slices"));
}

#[test]
fn test_chunks_rejects_zero_window() {
    let mut cmd = Command::cargo_bin("linebridge").unwrap();
    cmd.arg("chunks")
        .arg("-i")
        .arg(fixture_path("people.csv"))
        .arg("-w")
        .arg("0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("window_size must be greater than zero"));
}

#[test]
fn test_generate_config() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("linebridge.toml");

    let mut cmd = Command::cargo_bin("linebridge").unwrap();
    cmd.arg("generate-config").arg("-o").arg(&output);

    cmd.assert().success();
    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("[lines]"));
    assert!(content.contains("window_size = 4194304"));
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("linebridge").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("capped line streams"));
}
