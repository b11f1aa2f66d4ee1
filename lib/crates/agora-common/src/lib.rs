//! Shared configuration core for the Agora installer.
//!
//! Everything in this crate is pure: in-memory mappings in, in-memory
//! mappings (or strings) out. Fetching, file writing, and container
//! orchestration live behind ports in the CLI crate.

pub mod config;
pub mod keys;
pub mod model;
pub mod resolver;

pub use config::{ConfigSet, parse_env, render_env};
pub use model::{
    is_fallback_mapping, map_model_to_repository, model_display_name, token_limit_for_repository,
};
pub use resolver::{ConfigError, DefaultTables, resolve};
