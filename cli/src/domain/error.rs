//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator.

use thiserror::Error;

// ── Install errors ────────────────────────────────────────────────────────────

/// Errors raised while preparing or running an installation.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error(
        "No writable installation directory.\n\nTried: {tried}\n\nRe-run with sufficient permissions or point INSTALL_BASE_PATH at a writable location."
    )]
    NoWritableDirectory { tried: String },

    #[error("Invalid configuration name '{0}': must match ^[A-Za-z0-9][A-Za-z0-9._-]*$")]
    InvalidConfigName(String),

    #[error("Installation cancelled.")]
    Cancelled,
}

// ── Fetch errors ──────────────────────────────────────────────────────────────

/// Errors raised by the remote configuration fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Configuration '{name}' not found at {url}")]
    NotFound { name: String, url: String },

    #[error("Access denied fetching {url}. Check the access token.")]
    AccessDenied { url: String },

    #[error("Failed to fetch {url}: {reason}")]
    Failed { url: String, reason: String },
}
