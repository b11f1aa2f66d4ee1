//! Infrastructure implementation of the `ComposeRunner` port.
//!
//! Drives `docker compose` with `--project-directory` so the stack's own
//! `docker-compose.yml` and the generated override are both picked up, and
//! variable substitution reads the `.env` written next to them.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ComposeRunner};

/// Name of the external network shared by the stack containers.
pub const STACK_NETWORK: &str = "agora-network";

pub struct DockerCompose<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> DockerCompose<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn compose(&self, dir: &Path, tail: &[&str]) -> Result<std::process::ExitStatus> {
        let dir = dir.display().to_string();
        let mut args = vec!["compose", "--project-directory", dir.as_str()];
        args.extend_from_slice(tail);
        // Streams compose output straight to the terminal.
        self.runner.run_status("docker", &args).await
    }
}

impl<R: CommandRunner> ComposeRunner for DockerCompose<R> {
    async fn ensure_network(&self) -> Result<bool> {
        let output = self
            .runner
            .run(
                "docker",
                &[
                    "network",
                    "ls",
                    "--filter",
                    &format!("name={STACK_NETWORK}"),
                    "--format",
                    "{{.Name}}",
                ],
            )
            .await
            .context("docker network ls")?;
        let listed = String::from_utf8_lossy(&output.stdout);
        if listed.lines().any(|l| l.trim() == STACK_NETWORK) {
            return Ok(false);
        }

        let output = self
            .runner
            .run("docker", &["network", "create", STACK_NETWORK])
            .await
            .context("docker network create")?;
        anyhow::ensure!(
            output.status.success(),
            "failed to create network {STACK_NETWORK}:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
        Ok(true)
    }

    async fn down(&self, dir: &Path) -> Result<()> {
        let status = self.compose(dir, &["down"]).await.context("docker compose down")?;
        anyhow::ensure!(status.success(), "docker compose down failed");
        Ok(())
    }

    async fn pull(&self, dir: &Path) -> Result<()> {
        // Streamed without a timeout: first-install pulls are multi-GB and
        // docker's own progress output is the useful signal.
        let status = self.compose(dir, &["pull"]).await.context("docker compose pull")?;
        anyhow::ensure!(status.success(), "docker compose pull failed");
        Ok(())
    }

    async fn up(&self, dir: &Path) -> Result<()> {
        let status = self
            .compose(dir, &["up", "-d", "--remove-orphans"])
            .await
            .context("docker compose up")?;
        anyhow::ensure!(status.success(), "docker compose up failed");
        Ok(())
    }
}
