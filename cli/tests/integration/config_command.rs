//! Integration tests for `agora config` against local configuration files.

#![allow(clippy::expect_used)]

use std::io::Write as _;

use assert_cmd::Command;
use predicates::prelude::*;

fn agora() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agora"));
    cmd.env("NO_COLOR", "1");
    cmd
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

const COMPLETE_CONFIG: &str = "\
# test configuration
AGORA_VERSION=v1.7.1
MODEL_NAME=phi-2
HUGGINGFACE_TOKEN=\"hf_testtoken\"
INSTALL_FOLDER_PREFIX=agora
INSTALL_BASE_PATH=/var/apps
THEME_NAME=light
";

#[test]
fn test_config_resolve_file_outputs_resolved_env() {
    let file = config_file(COMPLETE_CONFIG);
    agora()
        .args(["config", "resolve", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("AGORA_VERSION=v1.7.1"))
        // Quotes are normalized away on parse.
        .stdout(predicate::str::contains("HUGGINGFACE_TOKEN=hf_testtoken"))
        // User value wins over the frontend default.
        .stdout(predicate::str::contains("THEME_NAME=light"))
        // Derived values.
        .stdout(predicate::str::contains("MODEL_REPO=TheBloke/phi-2-GGUF"))
        .stdout(predicate::str::contains("LLM_MAX_TOKENS=2048"))
        .stdout(predicate::str::contains("INFERENCE_MAX_TOKENS=2048"))
        // Interconnection keys hold the fixed container-network values.
        .stdout(predicate::str::contains("AGORA_URI=http://agora-api:7437"))
        .stdout(predicate::str::contains(
            "INFERENCE_URI=http://agora-inference:8091",
        ));
}

#[test]
fn test_config_resolve_overridden_interconnection_is_replaced() {
    let config = format!("{COMPLETE_CONFIG}AGORA_URI=http://example.com:9999\n");
    let file = config_file(&config);
    agora()
        .args(["config", "resolve", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("AGORA_URI=http://agora-api:7437"))
        .stdout(predicate::str::contains("http://example.com:9999").not());
}

#[test]
fn test_config_resolve_missing_keys_lists_all_of_them() {
    let file = config_file("AGORA_VERSION=v1.7.1\nMODEL_NAME=phi-2\n");
    agora()
        .args(["config", "resolve", "--file"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("HUGGINGFACE_TOKEN"))
        .stderr(predicate::str::contains("INSTALL_FOLDER_PREFIX"))
        .stderr(predicate::str::contains("INSTALL_BASE_PATH"))
        .stderr(predicate::str::contains("AGORA_VERSION").not());
}

#[test]
fn test_config_resolve_json_is_parseable_and_complete() {
    let file = config_file(COMPLETE_CONFIG);
    let output = agora()
        .args(["config", "resolve", "--json", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout must be valid JSON");
    let object = parsed.as_object().expect("top-level object");
    assert_eq!(
        object.get("AGORA_VERSION").and_then(|v| v.as_str()),
        Some("v1.7.1")
    );
    assert_eq!(
        object.get("LLM_MAX_TOKENS").and_then(|v| v.as_str()),
        object.get("INFERENCE_MAX_TOKENS").and_then(|v| v.as_str()),
    );
    // Per-run generated keys are present and non-empty.
    let api_key = object
        .get("AGORA_API_KEY")
        .and_then(|v| v.as_str())
        .expect("generated API key");
    assert_eq!(api_key.len(), 64);
}

#[test]
fn test_config_resolve_missing_file_fails() {
    agora()
        .args(["config", "resolve", "--file", "/nonexistent/agora.env"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_config_defaults_lists_layer_values() {
    agora()
        .args(["config", "defaults"])
        .assert()
        .success()
        .stdout(predicate::str::contains("THEME_NAME"))
        .stdout(predicate::str::contains("DATABASE_TYPE"))
        .stdout(predicate::str::contains("WHISPER_MODEL"));
}

#[test]
fn test_config_defaults_json_has_three_layers() {
    let output = agora()
        .args(["config", "defaults", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout must be valid JSON");
    assert!(parsed.get("backend").is_some());
    assert!(parsed.get("frontend").is_some());
    assert!(parsed.get("inference").is_some());
}
