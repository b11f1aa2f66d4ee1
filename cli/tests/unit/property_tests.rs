//! Property-based tests for critical validation and generation logic.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use agora_cli::domain::install::{generate_api_key, validate_config_name};
use agora_common::{
    ConfigSet, DefaultTables, keys, parse_env, render_env, resolve, token_limit_for_repository,
};

// ============================================================================
// generate_api_key() property tests
// ============================================================================

proptest! {
    /// Generated keys always have the correct format: 64 lowercase hex chars.
    #[test]
    fn prop_api_key_has_valid_format(_round in 0u32..50) {
        let key = generate_api_key();
        prop_assert_eq!(key.len(), 64, "wrong length: {}", key);
        prop_assert!(
            key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
            "non-hex chars: {}",
            key
        );
    }
}

#[test]
fn test_api_key_uniqueness_batch() {
    let generated: std::collections::HashSet<_> = (0..100).map(|_| generate_api_key()).collect();
    assert_eq!(generated.len(), 100, "duplicate keys generated");
}

// ============================================================================
// validate_config_name() property tests
// ============================================================================

proptest! {
    /// Names with path separators or whitespace are always rejected.
    #[test]
    fn prop_names_with_separators_rejected(
        prefix in "[a-z]{0,8}",
        bad in prop::sample::select(vec!["/", "\\", " ", "\t", "..;"]),
        suffix in "[a-z]{0,8}",
    ) {
        let name = format!("{prefix}{bad}{suffix}");
        prop_assert!(validate_config_name(&name).is_err(), "accepted: {name:?}");
    }

    /// Alphanumeric names with inner dots/dashes/underscores are accepted.
    #[test]
    fn prop_wellformed_names_accepted(name in "[A-Za-z0-9][A-Za-z0-9._-]{0,30}") {
        prop_assert!(validate_config_name(&name).is_ok(), "rejected: {name:?}");
    }
}

// ============================================================================
// Resolver invariants over random inputs
// ============================================================================

fn tables() -> DefaultTables {
    DefaultTables::with_api_keys("a".repeat(64), "b".repeat(64))
}

fn base_with_model(model: &str) -> ConfigSet {
    let mut set = ConfigSet::new();
    set.set(keys::AGORA_VERSION, "v1.0.0");
    set.set(keys::MODEL_NAME, model);
    set.set(keys::HUGGINGFACE_TOKEN, "hf_x");
    set.set(keys::INSTALL_FOLDER_PREFIX, "agora");
    set.set(keys::INSTALL_BASE_PATH, "/var/apps");
    set
}

proptest! {
    /// The token limit is total over arbitrary strings, including empty
    /// and marker-free ones.
    #[test]
    fn prop_token_limit_never_fails(repo in ".{0,80}") {
        let limit = token_limit_for_repository(&repo);
        prop_assert!(limit.parse::<u32>().is_ok(), "unparseable limit {limit:?}");
    }

    /// The two max-token keys are equal after resolution, whatever the
    /// model name.
    #[test]
    fn prop_max_token_keys_equal(model in "[a-zA-Z0-9./_-]{1,40}") {
        let resolved = resolve(&base_with_model(&model), &tables()).expect("resolves");
        prop_assert_eq!(
            resolved.get(keys::LLM_MAX_TOKENS),
            resolved.get(keys::INFERENCE_MAX_TOKENS)
        );
    }

    /// Interconnection keys hold the fixed internal values even when the
    /// base supplies something else.
    #[test]
    fn prop_interconnection_keys_fixed(uri in "http://[a-z]{1,10}:[0-9]{2,5}") {
        let mut base = base_with_model("phi-2");
        base.set(keys::AGORA_URI, uri.clone());
        base.set(keys::INFERENCE_URI, uri);
        let resolved = resolve(&base, &tables()).expect("resolves");
        prop_assert_eq!(resolved.get(keys::AGORA_URI), Some(keys::INTERNAL_API_URI));
        prop_assert_eq!(resolved.get(keys::INFERENCE_URI), Some(keys::INTERNAL_INFERENCE_URI));
    }

    /// Serializing a resolved set to env text and re-parsing it yields an
    /// equal set.
    #[test]
    fn prop_env_round_trip(model in "[a-zA-Z0-9._-]{1,32}") {
        let resolved = resolve(&base_with_model(&model), &tables()).expect("resolves");
        let text = render_env(&resolved, &["round trip"]);
        prop_assert_eq!(parse_env(&text), resolved);
    }
}
