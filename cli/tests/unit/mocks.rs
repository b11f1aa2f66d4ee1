//! Shared mock infrastructure for unit tests.
//!
//! Provides canned port implementations and output helpers so each test
//! file doesn't have to re-define the same boilerplate.

#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not every test file uses every mock

use std::collections::HashMap;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::Mutex;

use anyhow::Result;

use agora_cli::application::ports::{
    CommandRunner, ComposeRunner, ConfigFetcher, InstallFs, NetworkProbe, ProgressReporter,
    RepoCloner,
};

// ── Output helpers ────────────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: ExitStatus::from_raw(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(stderr: &[u8]) -> Output {
    Output {
        status: ExitStatus::from_raw(1 << 8),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Reporter ─────────────────────────────────────────────────────────────────

/// Records every reporter event for assertions.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<(String, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events
            .lock()
            .expect("reporter lock")
            .iter()
            .filter(|(kind, _)| kind == "warn")
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .expect("reporter lock")
            .iter()
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.events
            .lock()
            .expect("reporter lock")
            .push(("step".into(), message.into()));
    }
    fn success(&self, message: &str) {
        self.events
            .lock()
            .expect("reporter lock")
            .push(("success".into(), message.into()));
    }
    fn warn(&self, message: &str) {
        self.events
            .lock()
            .expect("reporter lock")
            .push(("warn".into(), message.into()));
    }
}

// ── Fetcher ──────────────────────────────────────────────────────────────────

/// Returns a fixed configuration text for any name.
pub struct StaticFetcher(pub String);

impl ConfigFetcher for StaticFetcher {
    async fn fetch(&self, _name: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Always fails, as an unreachable config host would.
pub struct FailingFetcher;

impl ConfigFetcher for FailingFetcher {
    async fn fetch(&self, name: &str) -> Result<String> {
        anyhow::bail!("cannot fetch '{name}': host unreachable")
    }
}

// ── Command runner ───────────────────────────────────────────────────────────

/// Canned command runner: commands whose `program args...` string starts
/// with a configured failure prefix return a failing exit status; a
/// `docker compose version` probe answers with `compose_version`.
pub struct ScriptedRunner {
    pub failures: Vec<String>,
    pub compose_version: String,
}

impl ScriptedRunner {
    pub fn all_ok() -> Self {
        Self {
            failures: Vec::new(),
            compose_version: "2.24.5".to_string(),
        }
    }

    pub fn failing(prefixes: &[&str]) -> Self {
        Self {
            failures: prefixes.iter().map(|p| (*p).to_string()).collect(),
            compose_version: "2.24.5".to_string(),
        }
    }

    fn respond(&self, program: &str, args: &[&str]) -> Output {
        let cmd = format!("{program} {}", args.join(" "));
        if self.failures.iter().any(|f| cmd.starts_with(f.as_str())) {
            return err_output(b"scripted failure");
        }
        if cmd.starts_with("docker compose version") {
            return ok_output(self.compose_version.as_bytes());
        }
        ok_output(b"")
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        Ok(self.respond(program, args))
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        _timeout: std::time::Duration,
    ) -> Result<Output> {
        Ok(self.respond(program, args))
    }

    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        Ok(self.respond(program, args).status)
    }
}

// ── Repo cloner ──────────────────────────────────────────────────────────────

/// Records clone attempts; branches listed in `failing_branches` fail.
#[derive(Default)]
pub struct FakeCloner {
    pub failing_branches: Vec<String>,
    pub existing_checkout: bool,
    pub attempts: Mutex<Vec<String>>,
}

impl RepoCloner for FakeCloner {
    async fn clone_branch(&self, _dest: &Path, branch: &str) -> Result<Output> {
        self.attempts
            .lock()
            .expect("cloner lock")
            .push(branch.to_string());
        if self.failing_branches.iter().any(|b| b == branch) {
            Ok(err_output(b"fatal: Remote branch not found"))
        } else {
            Ok(ok_output(b""))
        }
    }

    fn is_checkout(&self, _dest: &Path) -> bool {
        self.existing_checkout
    }
}

// ── Compose runner ───────────────────────────────────────────────────────────

/// Records orchestrator calls in order; individual calls can be failed.
#[derive(Default)]
pub struct RecordingCompose {
    pub network_missing: bool,
    pub fail_pull: bool,
    pub fail_up: bool,
    pub calls: Mutex<Vec<String>>,
}

impl RecordingCompose {
    fn record(&self, call: &str) {
        self.calls.lock().expect("compose lock").push(call.to_string());
    }

    pub fn recorded(&self) -> Vec<String> {
        self.calls.lock().expect("compose lock").clone()
    }
}

impl ComposeRunner for RecordingCompose {
    async fn ensure_network(&self) -> Result<bool> {
        self.record("ensure_network");
        Ok(self.network_missing)
    }

    async fn down(&self, _dir: &Path) -> Result<()> {
        self.record("down");
        Ok(())
    }

    async fn pull(&self, _dir: &Path) -> Result<()> {
        self.record("pull");
        if self.fail_pull {
            anyhow::bail!("pull failed")
        }
        Ok(())
    }

    async fn up(&self, _dir: &Path) -> Result<()> {
        self.record("up");
        if self.fail_up {
            anyhow::bail!("up failed")
        }
        Ok(())
    }
}

// ── Network probe ────────────────────────────────────────────────────────────

/// Probe where every check answers with the configured value.
pub struct ConstProbe(pub bool);

impl NetworkProbe for ConstProbe {
    async fn check_tcp_connectivity(&self, _host: &str, _port: u16) -> Result<bool> {
        Ok(self.0)
    }
    async fn check_dns_resolution(&self, _hostname: &str) -> Result<bool> {
        Ok(self.0)
    }
}

// ── Filesystem ───────────────────────────────────────────────────────────────

/// In-memory filesystem recording writes and directory creation.
#[derive(Default)]
pub struct MemFs {
    pub existing_dirs: Vec<PathBuf>,
    pub unwritable: Vec<PathBuf>,
    pub fail_create: Vec<PathBuf>,
    pub created: Mutex<Vec<PathBuf>>,
    pub files: Mutex<HashMap<PathBuf, (String, bool)>>,
}

impl MemFs {
    pub fn created_dirs(&self) -> Vec<PathBuf> {
        self.created.lock().expect("fs lock").clone()
    }

    /// Written content and whether it went through `write_private`.
    pub fn file(&self, path: &Path) -> Option<(String, bool)> {
        self.files.lock().expect("fs lock").get(path).cloned()
    }

    pub fn written_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.files.lock().expect("fs lock").keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl InstallFs for MemFs {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        if self.fail_create.iter().any(|p| p == path) {
            anyhow::bail!("permission denied")
        }
        self.created.lock().expect("fs lock").push(path.to_path_buf());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.existing_dirs.iter().any(|p| p == path)
    }

    fn is_writable(&self, path: &Path) -> bool {
        !self.unwritable.iter().any(|p| p == path)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        self.files
            .lock()
            .expect("fs lock")
            .insert(path.to_path_buf(), (contents.to_string(), false));
        Ok(())
    }

    fn write_private(&self, path: &Path, contents: &str) -> Result<()> {
        self.files
            .lock()
            .expect("fs lock")
            .insert(path.to_path_buf(), (contents.to_string(), true));
        Ok(())
    }
}
