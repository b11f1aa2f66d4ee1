//! Orchestration manifest generation — pure functions, no I/O, no async.
//!
//! [`compose_override`] accepts a resolved configuration and returns the
//! `docker-compose.override.yml` content as a `String`. The caller is
//! responsible for writing to disk.
//!
//! The manifest references configuration through `${KEY:-default}`
//! substitution. The declared defaults are advisory only — the environment
//! file written next to the manifest is authoritative. Secrets are
//! referenced as bare `${KEY}` so their values never appear in the manifest.

#![allow(clippy::format_push_string)]

use agora_common::{ConfigSet, keys};

/// Container images for the three services. The tag tracks the configured
/// stack branch at the compose level, not here.
const INFERENCE_IMAGE: &str = "agorastack/inference:main";
const API_IMAGE: &str = "agorastack/api:main";
const WEB_IMAGE: &str = "agorastack/web:main";

/// Keys whose resolved values must not be embedded as advisory defaults.
const SECRET_KEYS: &[&str] = &[
    keys::AGORA_API_KEY,
    keys::INFERENCE_API_KEY,
    keys::HUGGINGFACE_TOKEN,
];

/// Environment keys passed to the inference service.
const INFERENCE_ENV: &[&str] = &[
    keys::INFERENCE_API_KEY,
    keys::DEFAULT_MODEL,
    keys::MODEL_REPO,
    keys::HUGGINGFACE_TOKEN,
    keys::LLM_MAX_TOKENS,
    keys::THREADS,
    keys::GPU_LAYERS,
    keys::WHISPER_MODEL,
    keys::IMG_ENABLED,
    keys::AUTO_UPDATE,
];

/// Environment keys passed to the backend API service.
const API_ENV: &[&str] = &[
    keys::AGORA_VERSION,
    keys::AGORA_API_KEY,
    keys::AGORA_AUTO_UPDATE,
    keys::AGORA_BRANCH,
    keys::AGORA_REQUIRE_API_KEY,
    keys::AGORA_SERVER,
    keys::AGORA_URI,
    keys::UVICORN_WORKERS,
    keys::WORKING_DIRECTORY,
    keys::DATABASE_TYPE,
    keys::DATABASE_NAME,
    keys::LOG_LEVEL,
    keys::LOG_FORMAT,
    keys::ALLOWED_DOMAINS,
    keys::INFERENCE_URI,
    keys::INFERENCE_API_KEY,
    keys::INFERENCE_MAX_TOKENS,
    keys::INFERENCE_TEMPERATURE,
    keys::INFERENCE_TOP_P,
    keys::TZ,
];

/// Environment keys passed to the web frontend service.
const WEB_ENV: &[&str] = &[
    keys::APP_NAME,
    keys::APP_DESCRIPTION,
    keys::APP_URI,
    keys::AUTH_WEB,
    keys::DEFAULT_AGENT,
    keys::SHOW_SELECTION,
    keys::SHOW_AGENT_BAR,
    keys::SHOW_APP_BAR,
    keys::CONVERSATION_MODE,
    keys::INTERACTIVE_MODE,
    keys::THEME_NAME,
    keys::FOOTER_MESSAGE,
    keys::AUTH_PROVIDER,
    keys::CREATE_AGENT_ON_REGISTER,
    keys::ALLOW_EMAIL_SIGN_IN,
    keys::FILE_UPLOAD_ENABLED,
    keys::VOICE_INPUT_ENABLED,
    keys::RLHF_ENABLED,
    keys::ALLOW_MESSAGE_EDITING,
    keys::ALLOW_MESSAGE_DELETION,
    keys::AGORA_SERVER,
    keys::AGORA_URI,
    keys::TZ,
];

/// Generate `docker-compose.override.yml` content for the resolved set.
///
/// Returns the YAML string — does NOT write to disk.
#[must_use]
pub fn compose_override(resolved: &ConfigSet) -> String {
    let mut out = String::new();
    out.push_str("# Generated by agora install - DO NOT EDIT\n");
    out.push_str("# Authoritative values live in .env; the defaults below are advisory.\n");
    out.push_str("networks:\n");
    out.push_str("  agora-network:\n");
    out.push_str("    external: true\n");
    out.push('\n');
    out.push_str("services:\n");

    // Local-model inference service
    out.push_str("  agora-inference:\n");
    out.push_str(&format!("    image: {INFERENCE_IMAGE}\n"));
    out.push_str("    container_name: agora-inference\n");
    out.push_str("    restart: unless-stopped\n");
    append_environment(&mut out, resolved, INFERENCE_ENV);
    out.push_str("    ports:\n");
    append_port(&mut out, resolved, keys::INFERENCE_PORT, "8091", "8091");
    append_port(&mut out, resolved, keys::INFERENCE_UI_PORT, "8502", "8502");
    out.push_str("    volumes:\n");
    out.push_str("      - ./models:/app/models\n");
    out.push_str("    networks:\n");
    out.push_str("      - agora-network\n");
    out.push('\n');

    // Backend API service
    out.push_str("  agora-api:\n");
    out.push_str(&format!("    image: {API_IMAGE}\n"));
    out.push_str("    container_name: agora-api\n");
    out.push_str("    restart: unless-stopped\n");
    out.push_str("    depends_on:\n");
    out.push_str("      - agora-inference\n");
    append_environment(&mut out, resolved, API_ENV);
    out.push_str("    ports:\n");
    append_port(&mut out, resolved, keys::AGORA_API_PORT, "7437", "7437");
    out.push_str("    volumes:\n");
    out.push_str("      - ./models:/agora/models\n");
    out.push_str("      - ./WORKSPACE:/agora/WORKSPACE\n");
    out.push_str("    networks:\n");
    out.push_str("      - agora-network\n");
    out.push('\n');

    // Web frontend service
    out.push_str("  agora-web:\n");
    out.push_str(&format!("    image: {WEB_IMAGE}\n"));
    out.push_str("    container_name: agora-web\n");
    out.push_str("    restart: unless-stopped\n");
    out.push_str("    depends_on:\n");
    out.push_str("      - agora-api\n");
    append_environment(&mut out, resolved, WEB_ENV);
    out.push_str("    ports:\n");
    append_port(&mut out, resolved, keys::WEB_PORT, "3437", "3437");
    out.push_str("    volumes:\n");
    out.push_str("      - ./WORKSPACE:/app/WORKSPACE\n");
    out.push_str("    networks:\n");
    out.push_str("      - agora-network\n");

    out
}

/// Emit an `environment:` block. Keys absent from the resolved set are
/// skipped so the manifest never references an undefined variable.
fn append_environment(out: &mut String, resolved: &ConfigSet, env_keys: &[&str]) {
    out.push_str("    environment:\n");
    for key in env_keys {
        let Some(value) = resolved.get(key) else {
            continue;
        };
        if SECRET_KEYS.contains(key) {
            out.push_str(&format!("      - {key}=${{{key}}}\n"));
        } else {
            out.push_str(&format!("      - {key}=${{{key}:-{value}}}\n"));
        }
    }
}

/// Emit one host-port mapping with the resolved value as advisory default.
fn append_port(out: &mut String, resolved: &ConfigSet, key: &str, fallback: &str, container: &str) {
    let host_default = resolved.get(key).unwrap_or(fallback);
    out.push_str(&format!(
        "      - \"${{{key}:-{host_default}}}:{container}\"\n"
    ));
}

// ── Unit tests ───────────────────────────────────────────────────────────────
