//! `agora install` — provision the stack from a named configuration.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize as _;

use agora_common::{ConfigSet, DefaultTables, keys};

use crate::application::services::install_service::{
    self, InstallTimings, ProvisionOptions,
};
use crate::commands::config::{ResolveArgs, fetch_resolved};
use crate::domain::error::InstallError;
use crate::domain::health::EndpointCheck;
use crate::domain::install::{generate_api_key, secret_preview};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::compose::DockerCompose;
use crate::infra::fs::LocalInstallFs;
use crate::infra::git::GitCloner;
use crate::infra::network::TokioNetworkProbe;
use crate::output::OutputContext;
use crate::output::reporter::TerminalReporter;

/// Arguments for the install command.
#[derive(Args)]
pub struct InstallArgs {
    #[command(flatten)]
    pub source: ResolveArgs,

    /// Answer yes to prompts (reuse an existing installation directory)
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Write the configuration artifacts but do not start containers
    #[arg(long)]
    pub skip_start: bool,
}

/// Run `agora install`.
///
/// # Errors
///
/// Returns an error when the configuration cannot be fetched or resolved,
/// no writable installation directory is found, the user declines to reuse
/// an existing directory, or a provisioning step fails.
pub async fn run(ctx: &OutputContext, args: &InstallArgs) -> Result<ExitCode> {
    ctx.header("Agora stack installer");

    let tables = DefaultTables::with_api_keys(generate_api_key(), generate_api_key());
    let resolved = fetch_resolved(ctx, &args.source, &tables, false).await?;

    let fs = LocalInstallFs;
    let reporter = TerminalReporter::new(ctx);
    let target =
        install_service::select_install_dir(&fs, &reporter, &resolved, dirs::home_dir())?;

    if target.existed && !args.yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Directory {} already exists. Update the existing installation?",
                target.path.display()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            return Err(InstallError::Cancelled.into());
        }
    }

    let runner = TokioCommandRunner::default();
    let cloner = GitCloner::new(TokioCommandRunner::default());
    let compose = DockerCompose::new(TokioCommandRunner::default());
    let probe = TokioNetworkProbe;

    let endpoints = install_service::provision(
        &runner,
        &cloner,
        &compose,
        &fs,
        &probe,
        &reporter,
        &resolved,
        &target.path,
        ProvisionOptions {
            skip_start: args.skip_start,
            timings: InstallTimings::default(),
        },
    )
    .await?;

    render_summary(ctx, &resolved, &target.path, &endpoints);
    Ok(ExitCode::SUCCESS)
}

fn render_summary(
    ctx: &OutputContext,
    resolved: &ConfigSet,
    install_path: &Path,
    endpoints: &[EndpointCheck],
) {
    let get = |key: &str| resolved.get(key).unwrap_or("-").to_string();
    let url = |key: &str| {
        resolved
            .get(key)
            .map_or_else(|| "-".to_string(), |v| v.style(ctx.styles.url).to_string())
    };

    println!();
    ctx.header("Installation complete");
    println!();
    ctx.kv("Location      ", &install_path.display().to_string());
    ctx.kv("Version       ", &get(keys::AGORA_VERSION));
    ctx.kv("Model         ", &get(keys::MODEL_DISPLAY_NAME));
    ctx.kv("Web frontend  ", &url(keys::APP_URI));
    ctx.kv("Backend API   ", &url(keys::AGORA_SERVER));
    if let Some(api_key) = resolved.get(keys::AGORA_API_KEY) {
        ctx.kv("API key       ", &secret_preview(api_key));
    }
    println!();

    let unreachable: Vec<&EndpointCheck> = endpoints.iter().filter(|e| !e.reachable).collect();
    if !unreachable.is_empty() {
        ctx.warn("some services were still starting at the end of the wait:");
        for endpoint in unreachable {
            ctx.kv(
                &format!("  {:12}", endpoint.name),
                &format!("port {} not answering yet", endpoint.port),
            );
        }
        println!();
    }

    ctx.header("Useful commands");
    let dir = install_path.display();
    ctx.kv("View logs     ", &format!("cd {dir} && docker compose logs -f"));
    ctx.kv("Restart       ", &format!("cd {dir} && docker compose restart"));
    ctx.kv("Stop          ", &format!("cd {dir} && docker compose down"));
    println!();
}
