//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::output::OutputContext;

/// Provision a self-hosted AI agent stack
#[derive(Parser)]
#[command(
    name = "agora",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install the stack from a hosted configuration
    Install(commands::install::InstallArgs),

    /// Resolve and inspect configurations
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Diagnose issues
    Doctor,

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            no_color,
            quiet,
            json,
            command,
        } = self;
        match command {
            Command::Version => {
                commands::version::run(json);
                Ok(ExitCode::SUCCESS)
            }
            Command::Install(args) => {
                let ctx = OutputContext::new(no_color, quiet);
                commands::install::run(&ctx, &args).await
            }
            Command::Config(cmd) => {
                let ctx = OutputContext::new(no_color, quiet || json);
                commands::config::run(&ctx, cmd, json).await
            }
            Command::Doctor => {
                let ctx = OutputContext::new(no_color, quiet);
                commands::doctor::run(&ctx, json).await
            }
        }
    }
}
