//! Integration tests for the CLI surface: help, version, command hierarchy.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn agora() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agora"));
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    agora().assert().code(2).stderr(predicate::str::contains(
        "Provision a self-hosted AI agent stack",
    ));
}

#[test]
fn test_cli_help_flag_shows_help() {
    agora()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    agora()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("agora"));
}

#[test]
fn test_version_command_shows_version() {
    agora()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("agora 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_version_field() {
    agora()
        .arg("version")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""version":"0.1.0""#));
}

// --- Command hierarchy tests ---

#[test]
fn test_help_shows_install_command() {
    agora()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"));
}

#[test]
fn test_help_shows_config_command() {
    agora()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_help_shows_doctor_command() {
    agora()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("doctor"));
}

#[test]
fn test_install_requires_name_or_file() {
    agora()
        .arg("install")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_install_rejects_invalid_config_name() {
    // Fails on name validation before any network access.
    agora()
        .arg("install")
        .arg("../evil")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration name"));
}

#[test]
fn test_config_resolve_requires_name_or_file() {
    agora()
        .args(["config", "resolve"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("required"));
}
