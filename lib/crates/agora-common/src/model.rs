//! Model identifier mapping — pure string matching, no network access.
//!
//! Both tables are ordered slices, not maps: substring tie-breaks must be
//! deterministic, so the first declared entry wins.

/// Repository used when the model name is empty, a placeholder, or unknown.
pub const DEFAULT_MODEL_REPO: &str = "TheBloke/Mistral-7B-Instruct-v0.1-GGUF";

/// Token limit used when no family marker matches the repository path.
pub const FALLBACK_TOKEN_LIMIT: &str = "4096";

/// Single-file model extension. A name containing a path separator but
/// ending with this is a model file, not a repository path.
const MODEL_FILE_EXT: &str = ".gguf";

/// Short-name aliases to canonical repository paths, most specific first.
const MODEL_ALIASES: &[(&str, &str)] = &[
    ("deepseek-coder", "TheBloke/deepseek-coder-6.7B-instruct-GGUF"),
    ("codellama", "TheBloke/CodeLlama-7B-Instruct-GGUF"),
    ("tinyllama", "TheBloke/TinyLlama-1.1B-Chat-v1.0-GGUF"),
    ("llama-2", "TheBloke/Llama-2-7B-Chat-GGUF"),
    ("phi-2", "TheBloke/phi-2-GGUF"),
    ("mistral", "TheBloke/Mistral-7B-Instruct-v0.1-GGUF"),
];

/// Family markers to context window sizes. `tinyllama` must precede `llama`
/// or the small family would never match.
const TOKEN_LIMITS: &[(&str, &str)] = &[
    ("deepseek", "8192"),
    ("phi", "2048"),
    ("tinyllama", "2048"),
    ("llama", "4096"),
    ("mistral", "4096"),
];

/// How a model name was mapped to a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MappedVia {
    /// Rule 1 or 5 — the safe default repository.
    Fallback,
    /// Rule 2 or 3 — the alias table.
    Alias,
    /// Rule 4 — the input was already a repository path.
    PassThrough,
}

fn map_model(model_name: &str) -> (String, MappedVia) {
    let name = model_name.trim().to_lowercase();
    if name.is_empty() || name == "unknown" {
        return (DEFAULT_MODEL_REPO.to_string(), MappedVia::Fallback);
    }

    for (alias, repo) in MODEL_ALIASES {
        if name == *alias {
            return ((*repo).to_string(), MappedVia::Alias);
        }
    }

    for (alias, repo) in MODEL_ALIASES {
        if name.contains(alias) || alias.contains(name.as_str()) {
            return ((*repo).to_string(), MappedVia::Alias);
        }
    }

    if model_name.contains('/') && !name.ends_with(MODEL_FILE_EXT) {
        return (model_name.trim().to_string(), MappedVia::PassThrough);
    }

    (DEFAULT_MODEL_REPO.to_string(), MappedVia::Fallback)
}

/// Map a free-text model name to a repository path.
///
/// First applicable rule wins:
/// 1. empty or `unknown` → [`DEFAULT_MODEL_REPO`];
/// 2. exact case-insensitive alias match;
/// 3. substring match in either direction, first declared alias wins;
/// 4. contains `/` and is not a model file → already a repository path;
/// 5. otherwise → [`DEFAULT_MODEL_REPO`].
///
/// Always returns a non-empty repository path.
#[must_use]
pub fn map_model_to_repository(model_name: &str) -> String {
    map_model(model_name).0
}

/// Whether mapping this name falls back to the default repository, i.e.
/// nothing recognized it. Callers surface this as a warning so unintended
/// fallbacks get noticed; it never blocks an installation.
#[must_use]
pub fn is_fallback_mapping(model_name: &str) -> bool {
    map_model(model_name).1 == MappedVia::Fallback
}

/// Context window size for a repository path.
///
/// Ordered case-insensitive marker checks, first match wins; unknown
/// repositories get [`FALLBACK_TOKEN_LIMIT`]. Total — never fails.
#[must_use]
pub fn token_limit_for_repository(repository: &str) -> &'static str {
    let repo = repository.to_lowercase();
    for (marker, limit) in TOKEN_LIMITS {
        if repo.contains(marker) {
            return limit;
        }
    }
    FALLBACK_TOKEN_LIMIT
}

/// Display name for a resolved repository: its last path segment.
#[must_use]
pub fn model_display_name(repository: &str) -> String {
    repository
        .rsplit('/')
        .next()
        .unwrap_or(repository)
        .to_string()
}

// ── Unit tests ───────────────────────────────────────────────────────────────
