//! Unit tests for the agora CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod mocks;
mod property_tests;
