//! Layered configuration resolution.
//!
//! Pure functions only — the default tables are injected by the caller, so
//! resolution is reproducible and testable in isolation. Per-run entropy
//! (the generated API keys) enters through [`DefaultTables::with_api_keys`];
//! [`resolve`] itself reads no clock and no randomness.

use thiserror::Error;

use crate::config::ConfigSet;
use crate::keys;
use crate::model::{map_model_to_repository, model_display_name, token_limit_for_repository};

// ── Errors ───────────────────────────────────────────────────────────────────

/// Resolution failures. Missing mandatory keys are the only failure mode;
/// every other odd input is normalized rather than rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("configuration incomplete, missing required keys: {}", missing.join(", "))]
    Incomplete { missing: Vec<String> },
}

// ── Default tables ───────────────────────────────────────────────────────────

/// The three service default layers, applied in declaration order.
///
/// Tables are plain ordered pairs so a test can construct arbitrary layers;
/// [`DefaultTables::with_api_keys`] builds the production trio.
#[derive(Debug, Clone)]
pub struct DefaultTables {
    pub backend: Vec<(String, String)>,
    pub frontend: Vec<(String, String)>,
    pub inference: Vec<(String, String)>,
}

impl DefaultTables {
    /// Production default tables. The two API keys are generated once per
    /// installation run by the caller and threaded in here; re-resolving
    /// with the same tables changes nothing.
    #[must_use]
    pub fn with_api_keys(api_key: String, inference_api_key: String) -> Self {
        let owned = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<Vec<_>>()
        };

        let mut backend = vec![(keys::AGORA_API_KEY.to_string(), api_key)];
        backend.extend(owned(&[
            (keys::AGORA_API_PORT, "7437"),
            (keys::AGORA_SERVER, "http://localhost:7437"),
            (keys::AGORA_URI, keys::INTERNAL_API_URI),
            (keys::AGORA_BRANCH, "stable"),
            (keys::AGORA_AUTO_UPDATE, "true"),
            (keys::AGORA_REQUIRE_API_KEY, "true"),
            (keys::UVICORN_WORKERS, "6"),
            (keys::WORKING_DIRECTORY, "./WORKSPACE"),
            (keys::DATABASE_TYPE, "sqlite"),
            (keys::DATABASE_NAME, "models/agora"),
            (keys::LOG_LEVEL, "INFO"),
            (keys::LOG_FORMAT, "%(asctime)s | %(levelname)s | %(message)s"),
            (keys::ALLOWED_DOMAINS, "*"),
            (keys::TZ, "UTC"),
        ]));

        let frontend = owned(&[
            (keys::APP_NAME, "Agora"),
            (keys::APP_DESCRIPTION, "Agora - AI agent automation stack"),
            (keys::APP_URI, "http://localhost:3437"),
            (keys::AUTH_WEB, "http://localhost:3437/user"),
            (keys::WEB_PORT, "3437"),
            (keys::DEFAULT_AGENT, "Assistant"),
            (keys::INTERACTIVE_MODE, "chat"),
            (keys::THEME_NAME, "dark"),
            (keys::SHOW_SELECTION, "agent,conversation"),
            (keys::SHOW_AGENT_BAR, "true"),
            (keys::SHOW_APP_BAR, "true"),
            (keys::CONVERSATION_MODE, "select"),
            (keys::FILE_UPLOAD_ENABLED, "true"),
            (keys::VOICE_INPUT_ENABLED, "true"),
            (keys::RLHF_ENABLED, "true"),
            (keys::ALLOW_MESSAGE_EDITING, "true"),
            (keys::ALLOW_MESSAGE_DELETION, "true"),
            (keys::FOOTER_MESSAGE, "Powered by Agora"),
            (keys::AUTH_PROVIDER, "magicalauth"),
            (keys::CREATE_AGENT_ON_REGISTER, "true"),
            (keys::ALLOW_EMAIL_SIGN_IN, "true"),
        ]);

        let mut inference = vec![(keys::INFERENCE_API_KEY.to_string(), inference_api_key)];
        inference.extend(owned(&[
            (keys::INFERENCE_PORT, "8091"),
            (keys::INFERENCE_UI_PORT, "8502"),
            (keys::INFERENCE_URI, keys::INTERNAL_INFERENCE_URI),
            (keys::LLM_MAX_TOKENS, "4096"),
            (keys::INFERENCE_MAX_TOKENS, "4096"),
            (keys::INFERENCE_TEMPERATURE, "0.7"),
            (keys::INFERENCE_TOP_P, "0.95"),
            (keys::THREADS, "4"),
            (keys::GPU_LAYERS, "0"),
            (keys::WHISPER_MODEL, "base.en"),
            (keys::IMG_ENABLED, "false"),
            (keys::AUTO_UPDATE, "true"),
        ]));

        Self {
            backend,
            frontend,
            inference,
        }
    }

    /// Layers in application order: backend, then frontend, then inference.
    fn layers(&self) -> [&[(String, String)]; 3] {
        [&self.backend, &self.frontend, &self.inference]
    }
}

// ── Resolution ───────────────────────────────────────────────────────────────

/// Resolve a base configuration into the full variable set for all three
/// services.
///
/// Precedence: base values win over every default layer, earlier layers win
/// over later ones (insert-if-absent). Derivation rules run last and may
/// overwrite layer defaults; the interconnection keys are overwritten
/// unconditionally because they encode container-network addresses.
///
/// # Errors
///
/// [`ConfigError::Incomplete`] when one or more mandatory keys are missing
/// or empty — the error names all of them, so a caller can fix the whole
/// configuration in one pass.
pub fn resolve(base: &ConfigSet, tables: &DefaultTables) -> Result<ConfigSet, ConfigError> {
    let missing: Vec<String> = keys::MANDATORY_KEYS
        .iter()
        .filter(|key| !base.has_value(key))
        .map(|key| (*key).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ConfigError::Incomplete { missing });
    }

    let mut set = base.clone();

    for layer in tables.layers() {
        for (key, value) in layer {
            set.set_default(key.clone(), value.clone());
        }
    }

    derive_model_values(&mut set);
    apply_interconnection_overrides(&mut set);

    Ok(set)
}

/// Model-dependent derivations: repository, token limits, display name.
fn derive_model_values(set: &mut ConfigSet) {
    if !set.has_value(keys::MODEL_REPO) {
        let model_name = set.get(keys::MODEL_NAME).unwrap_or_default();
        set.set(keys::MODEL_REPO, map_model_to_repository(model_name));
    }

    let repo = set.get(keys::MODEL_REPO).unwrap_or_default().to_string();

    // Both token keys take the derived value; they must stay equal.
    let limit = token_limit_for_repository(&repo);
    set.set(keys::LLM_MAX_TOKENS, limit);
    set.set(keys::INFERENCE_MAX_TOKENS, limit);

    let display = model_display_name(&repo);
    set.set(keys::MODEL_DISPLAY_NAME, display.clone());
    set.set_default(keys::DEFAULT_MODEL, display);
}

/// Force the inter-service addresses to their container-network values.
/// The one exception to "earlier wins": user overrides for these keys
/// cannot produce a working stack, so they are replaced, not respected.
fn apply_interconnection_overrides(set: &mut ConfigSet) {
    set.set(keys::AGORA_URI, keys::INTERNAL_API_URI);
    set.set(keys::INFERENCE_URI, keys::INTERNAL_INFERENCE_URI);

    let app_uri = set
        .get(keys::APP_URI)
        .unwrap_or("http://localhost:3437")
        .trim_end_matches('/')
        .to_string();
    set.set(keys::AUTH_WEB, format!("{app_uri}/user"));
}

// ── Unit tests ───────────────────────────────────────────────────────────────
