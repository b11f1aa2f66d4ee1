//! `agora config` — resolve and inspect configurations.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use agora_common::{ConfigSet, DefaultTables, render_env};

use crate::application::services::install_service;
use crate::domain::install::{generate_api_key, validate_config_name};
use crate::infra::fetcher::{DEFAULT_CONFIG_BASE_URL, FileConfigFetcher, HttpConfigFetcher};
use crate::output::OutputContext;
use crate::output::reporter::{NullReporter, TerminalReporter};

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Fetch a configuration and print the fully resolved variable set
    Resolve(ResolveArgs),
    /// Print the built-in service default tables
    Defaults,
}

/// Arguments shared by configuration-consuming commands.
#[derive(Args)]
pub struct ResolveArgs {
    /// Name of the hosted configuration (fetches <base-url>/<name>.env)
    #[arg(required_unless_present = "file")]
    pub name: Option<String>,

    /// Read the configuration from a local file instead of fetching
    #[arg(long, value_name = "PATH", conflicts_with = "name")]
    pub file: Option<PathBuf>,

    /// Base URL configurations are hosted under
    #[arg(long, env = "AGORA_CONFIG_BASE_URL", default_value = DEFAULT_CONFIG_BASE_URL)]
    pub base_url: String,

    /// Access token for privately hosted configurations
    #[arg(long, env = "AGORA_CONFIG_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error when fetching fails or the configuration is missing
/// mandatory keys.
pub async fn run(ctx: &OutputContext, cmd: ConfigCommand, json: bool) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Resolve(args) => resolve_config(ctx, &args, json).await,
        ConfigCommand::Defaults => show_defaults(ctx, json),
    }
}

/// Fetch, resolve, and print. The resolver is pure, so this is the dry-run
/// twin of `agora install`: what it prints is exactly the `.env` an install
/// would write (API keys are freshly generated per run).
async fn resolve_config(ctx: &OutputContext, args: &ResolveArgs, json: bool) -> Result<ExitCode> {
    let tables = DefaultTables::with_api_keys(generate_api_key(), generate_api_key());
    let resolved = fetch_resolved(ctx, args, &tables, json).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&resolved).context("JSON serialization")?
        );
    } else {
        println!();
        print!("{}", render_env(&resolved, &[]));
    }
    Ok(ExitCode::SUCCESS)
}

/// Shared fetch-and-resolve used by `config resolve`; quiet in JSON mode so
/// progress lines never interleave with machine output.
pub async fn fetch_resolved(
    ctx: &OutputContext,
    args: &ResolveArgs,
    tables: &DefaultTables,
    quiet: bool,
) -> Result<ConfigSet> {
    if quiet {
        fetch_with(args, tables, &NullReporter).await
    } else {
        fetch_with(args, tables, &TerminalReporter::new(ctx)).await
    }
}

async fn fetch_with(
    args: &ResolveArgs,
    tables: &DefaultTables,
    reporter: &impl crate::application::ports::ProgressReporter,
) -> Result<ConfigSet> {
    match (&args.file, &args.name) {
        (Some(path), _) => {
            let fetcher = FileConfigFetcher::new(path.clone());
            let label = path.display().to_string();
            install_service::fetch_and_resolve(&fetcher, reporter, &label, tables).await
        }
        (None, Some(name)) => {
            validate_config_name(name)?;
            let fetcher = HttpConfigFetcher::new(args.base_url.clone(), args.token.clone());
            install_service::fetch_and_resolve(&fetcher, reporter, name, tables).await
        }
        (None, None) => anyhow::bail!("a configuration name or --file is required"),
    }
}

fn show_defaults(ctx: &OutputContext, json: bool) -> Result<ExitCode> {
    let placeholder = "<generated per install>";
    let tables = DefaultTables::with_api_keys(placeholder.to_string(), placeholder.to_string());

    if json {
        let out = serde_json::json!({
            "backend": pairs_json(&tables.backend),
            "frontend": pairs_json(&tables.frontend),
            "inference": pairs_json(&tables.inference),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("JSON serialization")?
        );
        return Ok(ExitCode::SUCCESS);
    }

    println!();
    for (title, layer) in [
        ("Backend service defaults", &tables.backend),
        ("Frontend service defaults", &tables.frontend),
        ("Inference service defaults", &tables.inference),
    ] {
        ctx.header(title);
        for (key, value) in layer {
            ctx.kv(&format!("{key:28}"), value);
        }
        println!();
    }
    Ok(ExitCode::SUCCESS)
}

fn pairs_json(layer: &[(String, String)]) -> serde_json::Value {
    serde_json::Value::Object(
        layer
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect(),
    )
}
