//! Infrastructure implementation of the `RepoCloner` port.
//!
//! All git calls are routed through a `CommandRunner` so tests can inject
//! a mock runner without spawning real processes.

use std::path::Path;
use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, RepoCloner};
use crate::domain::install::STACK_REPO_URL;
use crate::infra::command_runner::CLONE_TIMEOUT;

pub struct GitCloner<R: CommandRunner> {
    runner: R,
    repo_url: String,
}

impl<R: CommandRunner> GitCloner<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            repo_url: STACK_REPO_URL.to_string(),
        }
    }

    /// Override the repository URL (tests, forks).
    pub fn with_repo_url(runner: R, repo_url: String) -> Self {
        Self { runner, repo_url }
    }
}

impl<R: CommandRunner> RepoCloner for GitCloner<R> {
    async fn clone_branch(&self, dest: &Path, branch: &str) -> Result<Output> {
        let dest = dest.display().to_string();
        self.runner
            .run_with_timeout(
                "git",
                &[
                    "clone",
                    "--branch",
                    branch,
                    "--depth",
                    "1",
                    &self.repo_url,
                    &dest,
                ],
                CLONE_TIMEOUT,
            )
            .await
            .context("git clone")
    }

    fn is_checkout(&self, dest: &Path) -> bool {
        dest.join(".git").exists()
    }
}
