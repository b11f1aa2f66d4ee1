//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, HTTP
//! fetching, git, container orchestration, network probes, and filesystem
//! access.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod command_runner;
pub mod compose;
pub mod fetcher;
pub mod fs;
pub mod git;
pub mod network;
