//! Application service — doctor use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits. Rendering is the
//! caller's responsibility.

use anyhow::Result;

use agora_common::ConfigSet;

use crate::application::ports::{CommandRunner, NetworkProbe, ProgressReporter};
use crate::domain::health::{
    DoctorChecks, EndpointCheck, MIN_COMPOSE_VERSION, NetworkChecks, PrerequisiteChecks,
    stack_endpoints,
};

/// Run the doctor probe workflow.
///
/// `resolved` supplies endpoint ports when a configuration is at hand;
/// otherwise the default ports are probed.
///
/// # Errors
///
/// Probes themselves degrade to "not ok" rather than failing; the result is
/// always a complete [`DoctorChecks`].
pub async fn run_doctor(
    runner: &impl CommandRunner,
    probe: &impl NetworkProbe,
    reporter: &impl ProgressReporter,
    resolved: Option<&ConfigSet>,
) -> Result<DoctorChecks> {
    reporter.step("checking prerequisites...");
    let prerequisites = probe_prerequisites(runner).await;

    reporter.step("checking network...");
    let network = probe_network(probe).await;

    reporter.step("checking stack endpoints...");
    let endpoints = probe_endpoints(probe, resolved).await;

    reporter.success("diagnostics complete");
    Ok(DoctorChecks {
        prerequisites,
        network,
        endpoints,
    })
}

// ── Internal probes ───────────────────────────────────────────────────────────

/// Probe the host tooling: git, docker, the docker daemon, docker compose.
pub async fn probe_prerequisites(runner: &impl CommandRunner) -> PrerequisiteChecks {
    let git_found = command_succeeds(runner, "git", &["--version"]).await;
    let docker_found = command_succeeds(runner, "docker", &["--version"]).await;
    // `docker ps` answers only when the daemon is up.
    let docker_daemon_running =
        docker_found && command_succeeds(runner, "docker", &["ps"]).await;

    let (compose_found, compose_version) = match runner
        .run("docker", &["compose", "version", "--short"])
        .await
    {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            (true, (!version.is_empty()).then_some(version))
        }
        _ => (false, None),
    };
    // Unparseable versions are assumed ok rather than blocking.
    let compose_version_ok = compose_found
        && compose_version
            .as_deref()
            .map(|v| v.trim_start_matches('v'))
            .and_then(|v| semver::Version::parse(v).ok())
            .is_none_or(|v| v >= MIN_COMPOSE_VERSION);

    PrerequisiteChecks {
        git_found,
        docker_found,
        docker_daemon_running,
        compose_found,
        compose_version,
        compose_version_ok,
    }
}

async fn probe_network(probe: &impl NetworkProbe) -> NetworkChecks {
    let internet = probe
        .check_tcp_connectivity("8.8.8.8", 53)
        .await
        .unwrap_or(false);
    let dns = probe
        .check_dns_resolution("dns.google")
        .await
        .unwrap_or(false);
    NetworkChecks { internet, dns }
}

async fn probe_endpoints(
    probe: &impl NetworkProbe,
    resolved: Option<&ConfigSet>,
) -> Vec<EndpointCheck> {
    let mut checks = Vec::new();
    for (name, port) in stack_endpoints(resolved) {
        let reachable = probe
            .check_tcp_connectivity("127.0.0.1", port)
            .await
            .unwrap_or(false);
        checks.push(EndpointCheck {
            name,
            port,
            reachable,
        });
    }
    checks
}

async fn command_succeeds(runner: &impl CommandRunner, program: &str, args: &[&str]) -> bool {
    runner
        .run(program, args)
        .await
        .map(|o| o.status.success())
        .unwrap_or(false)
}
