//! samcheck - bottleneck and cost analysis for serverless application templates
//!
//! `samcheck check` reads a SAM (or plain CloudFormation) template, validates it
//! by translating it to CloudFormation, builds a graph of the Lambda functions
//! it declares (nested stacks included), asks how much traffic each function
//! receives, and reports concurrency bottlenecks and the expected monthly cost.
//!
//! # Pipeline
//!
//! 1. [`template`] - load the template and run the translation engine
//! 2. [`graph`] - extract the functions of every stack into a [`graph::CheckGraph`]
//! 3. [`check`] - ask the questions, run the calculations, print the results
//!
//! # Supporting Modules
//!
//! - [`providers`] - nested stack and function discovery
//! - [`cli`] - command-line interface
//! - [`config`] - global configuration (`~/.samcheck/config.toml`)
//! - [`core`] - error types and resource kinds
//! - [`constants`] - defaults, limits and prices
//!
//! # Example
//!
//! ```rust,no_run
//! use samcheck_cli::check::{CheckContext, ScriptedPrompter};
//! use samcheck_cli::template::SessionConfig;
//! use std::path::PathBuf;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let template = PathBuf::from("template.yaml");
//! let context = CheckContext::new(template.clone(), template, SessionConfig::default());
//! let mut answers = ScriptedPrompter::from_yaml("ApiFunction.tps: 50")?;
//! let graph = context.run(&mut answers).await?;
//! println!("{} function(s) analysed", graph.len());
//! # Ok(())
//! # }
//! ```

pub mod check;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod graph;
pub mod providers;
pub mod template;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
