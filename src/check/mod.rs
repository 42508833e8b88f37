//! Bottleneck and cost analysis stages.
//!
//! [`CheckContext::run`] drives the stages in order over one
//! [`CheckGraph`](crate::graph::CheckGraph):
//!
//! 1. [`BottleNecks`] asks for entry points and their load
//! 2. [`CheckPricing`] asks for monthly request volumes
//! 3. [`CheckCalculation`] computes concurrency, cost and findings
//! 4. [`CheckResults`] prints the outcome

pub mod bottlenecks;
pub mod calculation;
pub mod context;
pub mod pricing;
pub mod prompt;
pub mod results;

pub use bottlenecks::BottleNecks;
pub use calculation::{CheckCalculation, CheckSettings, Finding, Severity};
pub use context::CheckContext;
pub use pricing::CheckPricing;
pub use prompt::{Prompter, Question, ScriptedPrompter, TerminalPrompter};
pub use results::{CheckReport, CheckResults, OutputFormat};
