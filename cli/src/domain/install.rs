//! Installation domain types and pure path/identity functions.
//!
//! This module is intentionally free of I/O, async, and external layer
//! imports. All functions take data in and return data out.

use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use agora_common::{ConfigSet, keys};

use crate::domain::error::InstallError;

/// Git repository of the stack being installed.
pub const STACK_REPO_URL: &str = "https://github.com/agora-stack/agora.git";

/// Directory name under the user's home used when the configured base path
/// is not writable.
pub const HOME_FALLBACK_DIR: &str = "agora-installations";

#[allow(clippy::expect_used)] // compile-time constant pattern
static CONFIG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid regex"));

/// Validates a configuration name before it is spliced into a fetch URL.
///
/// # Errors
///
/// Returns an error when the name is empty or contains characters outside
/// `[A-Za-z0-9._-]`.
pub fn validate_config_name(name: &str) -> Result<()> {
    if !CONFIG_NAME_RE.is_match(name) {
        return Err(InstallError::InvalidConfigName(name.to_string()).into());
    }
    Ok(())
}

/// Directory name for an installation: `{INSTALL_FOLDER_PREFIX}-{AGORA_VERSION}`.
#[must_use]
pub fn install_dir_name(resolved: &ConfigSet) -> String {
    let prefix = resolved.get(keys::INSTALL_FOLDER_PREFIX).unwrap_or("agora");
    let version = resolved.get(keys::AGORA_VERSION).unwrap_or("unknown");
    format!("{prefix}-{version}")
}

/// Candidate installation directories in preference order: the configured
/// base path first, then a per-user fallback under `home`.
#[must_use]
pub fn candidate_install_paths(resolved: &ConfigSet, home: Option<PathBuf>) -> Vec<PathBuf> {
    let name = install_dir_name(resolved);
    let mut candidates = Vec::with_capacity(2);
    if let Some(base) = resolved.get(keys::INSTALL_BASE_PATH) {
        candidates.push(PathBuf::from(base).join(&name));
    }
    if let Some(home) = home {
        candidates.push(home.join(HOME_FALLBACK_DIR).join(&name));
    }
    candidates
}

/// Generate an API key: 64 lowercase hex characters.
///
/// Entropy sources: nanosecond timestamp and independent `RandomState`
/// hashes (`SipHash` with random keys), one round per 64-bit quarter.
#[must_use]
pub fn generate_api_key() -> String {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let mut out = String::with_capacity(64);
    for _ in 0..4 {
        let mut hasher = RandomState::new().build_hasher();
        hasher.write_u128(
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0),
        );
        hasher.write_u64(RandomState::new().build_hasher().finish());
        hasher.write_u64(RandomState::new().build_hasher().finish());
        out.push_str(&format!("{:016x}", hasher.finish()));
    }
    out
}

/// Shorten a secret for display: first 8 characters and an ellipsis.
#[must_use]
pub fn secret_preview(secret: &str) -> String {
    let head: String = secret.chars().take(8).collect();
    format!("{head}...")
}

// ── Unit tests ───────────────────────────────────────────────────────────────
