//! Smoke tests for the shopwalk CLI
//!
//! These tests verify basic CLI functionality without launching a browser.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the shopwalk binary
fn shopwalk() -> Command {
    let mut cmd = Command::cargo_bin("shopwalk").expect("shopwalk binary should exist");
    cmd.env_remove("SHOPWALK_CONFIG")
        .env_remove("SHOPWALK_CHROMIUM")
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    shopwalk()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_help_flag() {
    shopwalk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_no_args_fails() {
    shopwalk().assert().failure();
}

#[test]
fn test_run_subcommand_help() {
    shopwalk()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--fallback"))
        .stdout(predicate::str::contains("FRAGMENT"));
}

// ============================================================================
// Config Command Tests
// ============================================================================

#[test]
fn test_config_prints_defaults() {
    shopwalk()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default_fallback_term: adidas shoes"))
        .stdout(predicate::str::contains("price_min: '50'"))
        .stdout(predicate::str::contains("promo_frame_name: Sign Up via Text for Offers"));
}

#[test]
fn test_config_json_format() {
    shopwalk()
        .args(["config", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_pages\": 50"));
}

#[test]
fn test_config_file_overrides() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shopwalk.yaml");
    fs::write(&path, "max_pages: 7\nselection_size: '11'\n").unwrap();

    shopwalk()
        .args(["config", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("max_pages: 7"))
        .stdout(predicate::str::contains("selection_size: '11'"));
}

#[test]
fn test_config_invalid_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shopwalk.yaml");
    fs::write(&path, "max_pages: 0\n").unwrap();

    shopwalk()
        .args(["config", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_pages"));
}

#[test]
fn test_config_missing_file_fails() {
    shopwalk()
        .args(["config", "--config", "/nonexistent/shopwalk.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

// ============================================================================
// Run Command Argument Validation
// ============================================================================

#[test]
fn test_run_needs_three_fragments() {
    shopwalk()
        .args(["run", "--url", "https://shop.test", "Nike", "Calm"])
        .assert()
        .failure();
}

#[test]
fn test_run_rejects_blank_fragment() {
    shopwalk()
        .args(["run", "--url", "https://shop.test", "Nike", "", "Slip-On"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fragment 2 is empty"));
}

#[test]
fn test_run_rejects_zero_max_pages() {
    shopwalk()
        .args([
            "run",
            "--url",
            "https://shop.test",
            "Nike",
            "Calm",
            "Slip-On",
            "--max-pages",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--max-pages"));
}
