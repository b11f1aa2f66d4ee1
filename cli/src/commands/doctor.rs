//! `agora doctor` — host and stack health diagnostics.

use std::process::ExitCode;

use anyhow::{Context, Result};
use owo_colors::OwoColorize as _;

use crate::application::services::doctor_service;
use crate::domain::health::{DoctorChecks, collect_issues};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::network::TokioNetworkProbe;
use crate::output::reporter::NullReporter;
use crate::output::{OutputContext, progress};

/// Run `agora doctor`.
///
/// # Errors
///
/// Returns an error if the probes cannot be executed or output fails.
pub async fn run(ctx: &OutputContext, json: bool) -> Result<ExitCode> {
    let runner = TokioCommandRunner::default();
    let probe = TokioNetworkProbe;

    let pb = ctx.show_progress().then(|| progress::spinner("running diagnostics..."));
    let checks = doctor_service::run_doctor(&runner, &probe, &NullReporter, None).await?;
    if let Some(pb) = &pb {
        progress::finish_ok(pb, "diagnostics complete");
    }

    let issues = collect_issues(&checks);

    if json {
        let status = if issues.is_empty() { "healthy" } else { "unhealthy" };
        let out = serde_json::json!({
            "status": status,
            "checks": checks,
            "issues": issues,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("JSON serialization")?
        );
    } else {
        render_human(ctx, &checks, &issues);
    }

    if issues.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn render_human(ctx: &OutputContext, checks: &DoctorChecks, issues: &[String]) {
    println!();
    println!("  {}", "Agora Health Check".style(ctx.styles.header));
    println!();

    println!("  Prerequisites:");
    let prereq = &checks.prerequisites;
    print_check(ctx, prereq.git_found, "git available");
    print_check(ctx, prereq.docker_found, "docker available");
    if prereq.docker_found {
        print_check(ctx, prereq.docker_daemon_running, "docker daemon running");
    }
    if prereq.compose_found {
        let version = prereq.compose_version.as_deref().unwrap_or("unknown version");
        print_check(
            ctx,
            prereq.compose_version_ok,
            &format!("docker compose {version}"),
        );
    } else {
        print_check(ctx, false, "docker compose available");
    }
    println!();

    println!("  Network:");
    print_check(ctx, checks.network.internet, "Internet connectivity");
    print_check(ctx, checks.network.dns, "DNS resolution working");
    println!();

    println!("  Stack endpoints:");
    for endpoint in &checks.endpoints {
        if endpoint.reachable {
            print_check(ctx, true, &format!("{} (port {})", endpoint.name, endpoint.port));
        } else {
            // Unreachable endpoints are informational — the stack may not
            // be installed yet.
            println!(
                "    {} {} (port {}) not answering",
                "·".style(ctx.styles.dim),
                endpoint.name,
                endpoint.port
            );
        }
    }

    println!();
    if issues.is_empty() {
        println!("  {} Everything looks good!", "✓".style(ctx.styles.success));
    } else {
        println!(
            "  {} Found {} issue{}:",
            "✗".style(ctx.styles.error),
            issues.len(),
            if issues.len() == 1 { "" } else { "s" },
        );
        for issue in issues {
            println!("    - {issue}");
        }
    }
    println!();
}

fn print_check(ctx: &OutputContext, ok: bool, msg: &str) {
    if ok {
        println!("    {} {msg}", "✓".style(ctx.styles.success));
    } else {
        println!("    {} {msg}", "✗".style(ctx.styles.error));
    }
}
