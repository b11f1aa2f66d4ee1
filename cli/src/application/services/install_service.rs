//! Application service — installation use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits. Interactive prompts stay
//! in the command layer: the service exposes the fetch/resolve, directory
//! selection, and provisioning phases separately so the caller can confirm
//! directory reuse in between.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;

use agora_common::{ConfigSet, DefaultTables, keys, model, parse_env, render_env, resolve};

use crate::application::ports::{
    CommandRunner, ComposeRunner, ConfigFetcher, InstallFs, NetworkProbe, ProgressReporter,
    RepoCloner,
};
use crate::application::services::doctor_service;
use crate::domain::error::InstallError;
use crate::domain::health::{EndpointCheck, prerequisite_issues, stack_endpoints};
use crate::domain::install::candidate_install_paths;
use crate::domain::manifest::compose_override;

/// Timing knobs for the endpoint wait loop, injectable so tests don't sleep.
#[derive(Debug, Clone, Copy)]
pub struct InstallTimings {
    /// Total time to wait for the stack endpoints to come up.
    pub endpoint_timeout: Duration,
    /// Pause between probe rounds.
    pub poll_interval: Duration,
}

impl Default for InstallTimings {
    fn default() -> Self {
        Self {
            endpoint_timeout: Duration::from_secs(120),
            poll_interval: Duration::from_secs(5),
        }
    }
}

/// Selected installation directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    pub path: PathBuf,
    /// Whether the directory pre-existed (caller should confirm reuse).
    pub existed: bool,
}

// ── Fetch and resolve ─────────────────────────────────────────────────────────

/// Fetch the named configuration, parse it, and resolve it against the
/// given default tables.
///
/// # Errors
///
/// Propagates fetch failures and `ConfigError::Incomplete` (every missing
/// mandatory key is listed in the error).
pub async fn fetch_and_resolve(
    fetcher: &impl ConfigFetcher,
    reporter: &impl ProgressReporter,
    name: &str,
    tables: &DefaultTables,
) -> Result<ConfigSet> {
    reporter.step(&format!("fetching configuration '{name}'..."));
    let text = fetcher.fetch(name).await?;
    let base = parse_env(&text);
    reporter.success(&format!("loaded {} configuration variables", base.len()));

    let resolved = resolve(&base, tables)?;

    // Unrecognized model names degrade to the safe default repository.
    // Never fatal, but the operator should notice.
    let model_name = resolved.get(keys::MODEL_NAME).unwrap_or_default();
    if !base.has_value(keys::MODEL_REPO) && model::is_fallback_mapping(model_name) {
        reporter.warn(&format!(
            "model '{model_name}' not recognized, using default repository {}",
            model::DEFAULT_MODEL_REPO
        ));
    }

    reporter.success(&format!(
        "configuration resolved: {} variables, model {}",
        resolved.len(),
        resolved.get(keys::MODEL_DISPLAY_NAME).unwrap_or("unknown"),
    ));
    Ok(resolved)
}

// ── Directory selection ───────────────────────────────────────────────────────

/// Pick the installation directory: the configured base path first, then
/// the per-user fallback. A candidate qualifies when it exists (and is
/// writable) or can be created writable.
///
/// # Errors
///
/// [`InstallError::NoWritableDirectory`] when every candidate fails.
pub fn select_install_dir(
    fs: &impl InstallFs,
    reporter: &impl ProgressReporter,
    resolved: &ConfigSet,
    home: Option<PathBuf>,
) -> Result<InstallTarget> {
    let candidates = candidate_install_paths(resolved, home);
    let mut tried = Vec::with_capacity(candidates.len());

    for path in candidates {
        if fs.exists(&path) {
            if fs.is_writable(&path) {
                return Ok(InstallTarget {
                    path,
                    existed: true,
                });
            }
            reporter.warn(&format!("no write permission for {}", path.display()));
        } else if fs.create_dir_all(&path).is_ok() && fs.is_writable(&path) {
            return Ok(InstallTarget {
                path,
                existed: false,
            });
        } else {
            reporter.warn(&format!("cannot create {}", path.display()));
        }
        tried.push(path.display().to_string());
    }

    Err(InstallError::NoWritableDirectory {
        tried: tried.join(", "),
    }
    .into())
}

// ── Provisioning ──────────────────────────────────────────────────────────────

/// Options for [`provision`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProvisionOptions {
    /// Write files but do not touch the orchestrator.
    pub skip_start: bool,
    /// Endpoint wait timings.
    pub timings: InstallTimings,
}

/// Run the provisioning flow into a selected directory: pre-flight checks,
/// network, clone, config artifacts, container startup, endpoint wait.
///
/// # Errors
///
/// Returns an error when a required step fails. Image pull failures and
/// endpoint wait timeouts degrade to warnings.
pub async fn provision(
    runner: &impl CommandRunner,
    cloner: &impl RepoCloner,
    compose: &impl ComposeRunner,
    fs: &impl InstallFs,
    probe: &impl NetworkProbe,
    reporter: &impl ProgressReporter,
    resolved: &ConfigSet,
    install_path: &Path,
    opts: ProvisionOptions,
) -> Result<Vec<EndpointCheck>> {
    // Pre-flight: missing host tooling fails before anything is written.
    reporter.step("checking prerequisites...");
    let prereq = doctor_service::probe_prerequisites(runner).await;
    let issues = prerequisite_issues(&prereq);
    if !issues.is_empty() {
        anyhow::bail!("prerequisites not met:\n  {}", issues.join("\n  "));
    }
    reporter.success("prerequisites ok");

    reporter.step("checking container network...");
    if compose.ensure_network().await.context("ensuring stack network")? {
        reporter.success("created network agora-network");
    } else {
        reporter.success("network agora-network present");
    }

    clone_stack(cloner, reporter, resolved, install_path).await?;
    write_artifacts(fs, reporter, resolved, install_path)?;

    if opts.skip_start {
        reporter.warn("container startup skipped");
        return Ok(Vec::new());
    }

    reporter.step("restarting stack containers...");
    if let Err(e) = compose.down(install_path).await {
        reporter.warn(&format!("stopping previous containers failed: {e}"));
    }
    if let Err(e) = compose.pull(install_path).await {
        reporter.warn(&format!("image pull failed, continuing with cached images: {e}"));
    }
    compose.up(install_path).await.context("starting stack containers")?;
    reporter.success("stack containers started");

    let endpoints = wait_for_endpoints(probe, reporter, resolved, opts.timings).await;
    Ok(endpoints)
}

/// Clone the stack repository, falling back to `main` when the configured
/// branch cannot be cloned. An existing checkout is reused untouched.
async fn clone_stack(
    cloner: &impl RepoCloner,
    reporter: &impl ProgressReporter,
    resolved: &ConfigSet,
    install_path: &Path,
) -> Result<()> {
    if cloner.is_checkout(install_path) {
        reporter.warn("existing checkout found, reusing it as-is");
        return Ok(());
    }

    let branch = resolved.get(keys::AGORA_BRANCH).unwrap_or("stable");
    reporter.step(&format!("cloning stack repository (branch: {branch})..."));
    let output = cloner
        .clone_branch(install_path, branch)
        .await
        .context("cloning stack repository")?;
    if output.status.success() {
        reporter.success("repository cloned");
        return Ok(());
    }

    reporter.warn(&format!("branch '{branch}' clone failed, trying main..."));
    let output = cloner
        .clone_branch(install_path, "main")
        .await
        .context("cloning stack repository (main)")?;
    anyhow::ensure!(
        output.status.success(),
        "failed to clone stack repository:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    reporter.success("repository cloned (main)");
    Ok(())
}

/// Write the environment file (0600) and the compose override manifest.
fn write_artifacts(
    fs: &impl InstallFs,
    reporter: &impl ProgressReporter,
    resolved: &ConfigSet,
    install_path: &Path,
) -> Result<()> {
    reporter.step("writing configuration artifacts...");

    let generated = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let header = [
        format!("Generated: {generated}"),
        format!("Installation: {}", install_path.display()),
    ];
    let header_refs: Vec<&str> = header.iter().map(String::as_str).collect();
    let env_text = render_env(resolved, &header_refs);
    fs.write_private(&install_path.join(".env"), &env_text)
        .context("writing .env")?;

    let manifest = compose_override(resolved);
    fs.write(&install_path.join("docker-compose.override.yml"), &manifest)
        .context("writing docker-compose.override.yml")?;

    reporter.success("environment file and manifest written");
    Ok(())
}

/// Probe the stack endpoints until all answer or the timeout elapses.
/// Timeouts degrade to a warning — services may still be warming up.
pub async fn wait_for_endpoints(
    probe: &impl NetworkProbe,
    reporter: &impl ProgressReporter,
    resolved: &ConfigSet,
    timings: InstallTimings,
) -> Vec<EndpointCheck> {
    reporter.step("waiting for services to come up...");
    let targets = stack_endpoints(Some(resolved));
    let deadline = tokio::time::Instant::now() + timings.endpoint_timeout;

    let mut checks: Vec<EndpointCheck> = targets
        .into_iter()
        .map(|(name, port)| EndpointCheck {
            name,
            port,
            reachable: false,
        })
        .collect();

    loop {
        for check in &mut checks {
            if !check.reachable {
                check.reachable = probe
                    .check_tcp_connectivity("127.0.0.1", check.port)
                    .await
                    .unwrap_or(false);
            }
        }
        if checks.iter().all(|c| c.reachable) {
            reporter.success("all services answering");
            break;
        }
        if tokio::time::Instant::now() >= deadline {
            let waiting: Vec<String> = checks
                .iter()
                .filter(|c| !c.reachable)
                .map(|c| format!("{} (port {})", c.name, c.port))
                .collect();
            reporter.warn(&format!(
                "not answering yet: {} (services may still be starting)",
                waiting.join(", ")
            ));
            break;
        }
        tokio::time::sleep(timings.poll_interval).await;
    }

    checks
}
