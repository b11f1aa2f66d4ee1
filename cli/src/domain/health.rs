//! Doctor check result types and pure issue collection.

use serde::Serialize;

use agora_common::{ConfigSet, keys};

/// Minimum docker compose version the stack manifests rely on.
pub const MIN_COMPOSE_VERSION: semver::Version = semver::Version::new(2, 0, 0);

// ── Check result types ────────────────────────────────────────────────────────

/// All check categories returned by the doctor command.
#[derive(Debug, Serialize)]
pub struct DoctorChecks {
    /// Host tooling prerequisites.
    pub prerequisites: PrerequisiteChecks,
    /// Network health.
    pub network: NetworkChecks,
    /// Stack endpoint reachability.
    pub endpoints: Vec<EndpointCheck>,
}

/// Host tooling checks.
#[derive(Debug, Default, Serialize)]
pub struct PrerequisiteChecks {
    /// Whether `git` is on the PATH.
    pub git_found: bool,
    /// Whether `docker` is on the PATH.
    pub docker_found: bool,
    /// Whether the docker daemon answered `docker ps`.
    pub docker_daemon_running: bool,
    /// Whether `docker compose` is available.
    pub compose_found: bool,
    /// Reported compose version, when parseable.
    pub compose_version: Option<String>,
    /// Whether the compose version meets [`MIN_COMPOSE_VERSION`].
    /// Unparseable versions are assumed ok rather than blocking.
    pub compose_version_ok: bool,
}

/// Network health checks.
#[derive(Debug, Serialize)]
pub struct NetworkChecks {
    /// Whether internet connectivity is available.
    pub internet: bool,
    /// Whether DNS resolution is working.
    pub dns: bool,
}

/// Reachability of one stack endpoint on the local host.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointCheck {
    /// Human-readable service name.
    pub name: String,
    /// Host port probed.
    pub port: u16,
    /// Whether a TCP connection succeeded.
    pub reachable: bool,
}

// ── Endpoint table ────────────────────────────────────────────────────────────

/// The stack endpoints to probe, with ports taken from the resolved
/// configuration when available.
#[must_use]
pub fn stack_endpoints(resolved: Option<&ConfigSet>) -> Vec<(String, u16)> {
    let port = |key: &str, fallback: u16| -> u16 {
        resolved
            .and_then(|set| set.get(key))
            .and_then(|v| v.parse().ok())
            .unwrap_or(fallback)
    };
    vec![
        ("Web frontend".to_string(), port(keys::WEB_PORT, 3437)),
        ("Backend API".to_string(), port(keys::AGORA_API_PORT, 7437)),
        ("Inference API".to_string(), port(keys::INFERENCE_PORT, 8091)),
        ("Inference UI".to_string(), port(keys::INFERENCE_UI_PORT, 8502)),
    ]
}

// ── Issue collection ──────────────────────────────────────────────────────────

/// Issues from the prerequisite checks alone. Shared between the doctor
/// report and the install pre-flight gate.
#[must_use]
pub fn prerequisite_issues(prereq: &PrerequisiteChecks) -> Vec<String> {
    let mut issues = Vec::new();
    if !prereq.git_found {
        issues.push("git not found. Install it first.".to_string());
    }
    if !prereq.docker_found {
        issues.push("docker not found. Install it first.".to_string());
    } else if !prereq.docker_daemon_running {
        issues.push("docker daemon not running. Start it with: sudo systemctl start docker".to_string());
    }
    if !prereq.compose_found {
        issues.push("docker compose not found. Install the compose plugin.".to_string());
    } else if !prereq.compose_version_ok {
        let found = prereq.compose_version.as_deref().unwrap_or("unknown");
        issues.push(format!(
            "docker compose {found} is too old (need {MIN_COMPOSE_VERSION}+)"
        ));
    }
    issues
}

/// Collect actionable issues from check results.
///
/// Unreachable endpoints are a warning only (services may simply not be
/// installed yet) and are NOT included.
#[must_use]
pub fn collect_issues(checks: &DoctorChecks) -> Vec<String> {
    let mut issues = prerequisite_issues(&checks.prerequisites);
    if !checks.network.dns {
        issues.push("DNS resolution failed".to_string());
    }
    issues
}

// ── Unit tests ───────────────────────────────────────────────────────────────
