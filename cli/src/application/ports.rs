//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds
    /// `timeout`. On timeout, the child process must be killed (not left
    /// orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;

    /// Run a program with inherited stdio and return only its exit status.
    /// No timeout — used for long streaming commands like `docker compose up`.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<std::process::ExitStatus>;
}

// ── Configuration Fetch Port ──────────────────────────────────────────────────

/// Fetches a named raw configuration (`KEY=VALUE` text) from wherever
/// configurations are hosted.
#[allow(async_fn_in_trait)]
pub trait ConfigFetcher {
    /// Fetch the raw text of the named configuration.
    async fn fetch(&self, name: &str) -> Result<String>;
}

// ── Repository Port ───────────────────────────────────────────────────────────

/// Clones the stack repository into an installation directory.
#[allow(async_fn_in_trait)]
pub trait RepoCloner {
    /// Shallow-clone the given branch into `dest`. Returns the process
    /// output so the caller can decide on branch fallback.
    async fn clone_branch(&self, dest: &Path, branch: &str) -> Result<Output>;

    /// Whether `dest` already holds a git checkout.
    fn is_checkout(&self, dest: &Path) -> bool;
}

// ── Orchestration Port ────────────────────────────────────────────────────────

/// Drives the container orchestrator for an installation directory.
#[allow(async_fn_in_trait)]
pub trait ComposeRunner {
    /// Ensure the shared stack network exists. Returns `true` when it had
    /// to be created.
    async fn ensure_network(&self) -> Result<bool>;

    /// Stop and remove the stack containers. Failure is not fatal to an
    /// install run; callers may ignore the result.
    async fn down(&self, dir: &Path) -> Result<()>;

    /// Pull the stack images.
    async fn pull(&self, dir: &Path) -> Result<()>;

    /// Start the stack detached.
    async fn up(&self, dir: &Path) -> Result<()>;
}

// ── Network Probe Port ────────────────────────────────────────────────────────

/// Abstracts network connectivity checks so application services can be
/// tested without real network access.
#[allow(async_fn_in_trait)]
pub trait NetworkProbe {
    /// Check TCP connectivity to the given host and port.
    async fn check_tcp_connectivity(&self, host: &str, port: u16) -> Result<bool>;
    /// Check DNS resolution for the given hostname.
    async fn check_dns_resolution(&self, hostname: &str) -> Result<bool>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts the local filesystem operations an installation needs.
pub trait InstallFs {
    /// Create a directory and all parents.
    ///
    /// # Errors
    ///
    /// Returns an error if creation fails.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Whether the directory exists.
    fn exists(&self, path: &Path) -> bool;

    /// Probe whether the directory accepts writes (creates and removes a
    /// scratch file).
    fn is_writable(&self, path: &Path) -> bool;

    /// Write a file atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the write or rename fails.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Write a file atomically with owner-only permissions (0600 on unix).
    ///
    /// # Errors
    ///
    /// Returns an error if the write, rename, or chmod fails.
    fn write_private(&self, path: &Path, contents: &str) -> Result<()>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
