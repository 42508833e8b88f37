//! Integration test suite for samcheck
//!
//! End-to-end tests driving the `samcheck` binary against templates written
//! to temporary directories. Questions are answered with `--answers` files.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **check**: Successful `check` runs in text and JSON format
//! - **config**: Global configuration handling
//! - **error_scenarios**: Missing, malformed and invalid templates, bad answers
//! - **nested_stacks**: Templates with nested applications and stacks

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod check;
mod config;
mod error_scenarios;
mod nested_stacks;
