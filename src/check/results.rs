//! Printing the analysis.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::fmt;

use super::calculation::{Finding, Severity};
use crate::core::ResourceKind;
use crate::graph::{CheckGraph, ConcurrencyUsage};
use crate::providers::{Architecture, PackageType};

/// Output format for `samcheck check`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable text.
    #[default]
    Text,
    /// A single JSON document, for automation.
    Json,
}

/// Per-function part of a [`CheckReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionReport {
    /// Logical id.
    pub name: String,
    /// Stack path (empty for the root stack).
    pub stack_path: String,
    /// Resource kind.
    pub kind: ResourceKind,
    /// Physical `FunctionName`, when set.
    pub function_name: Option<String>,
    pub runtime: Option<String>,
    pub handler: Option<String>,
    /// Code location after the local code rewrite.
    pub code_uri: Option<String>,
    pub package_type: PackageType,
    pub architecture: Architecture,
    /// Configured memory in MB.
    pub memory_size: u32,
    /// Configured timeout in seconds.
    pub timeout: u32,
    /// Whether the function was selected as an entry point.
    pub entry_point: bool,
    /// Requests per second.
    pub tps: Option<f64>,
    /// Expected duration in milliseconds.
    pub duration_ms: Option<f64>,
    /// Requests per month.
    pub monthly_requests: Option<u64>,
    /// Concurrency needed.
    pub concurrency: Option<ConcurrencyUsage>,
    /// Monthly cost in USD.
    pub monthly_cost: Option<f64>,
}

/// Everything `samcheck check` reports, as serialized for `--format json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    /// Functions in graph order.
    pub functions: Vec<FunctionReport>,
    /// Findings in the order they were recorded.
    pub findings: Vec<Finding>,
    /// Sum of the known monthly costs.
    pub total_monthly_cost: f64,
}

impl CheckReport {
    /// Report for an analysed graph.
    #[must_use]
    pub fn from_graph(graph: &CheckGraph) -> Self {
        let functions: Vec<FunctionReport> = graph
            .nodes()
            .iter()
            .map(|node| FunctionReport {
                name: node.name.clone(),
                stack_path: node.stack_path().to_string(),
                kind: node.kind,
                function_name: node.resource.function_name.clone(),
                runtime: node.resource.runtime.clone(),
                handler: node.resource.handler.clone(),
                code_uri: node.resource.code_uri.clone(),
                package_type: node.resource.package_type,
                architecture: node.resource.architecture,
                memory_size: node.resource.memory_size,
                timeout: node.resource.timeout,
                entry_point: node.analysis.entry_point,
                tps: node.analysis.tps,
                duration_ms: node.analysis.duration_ms,
                monthly_requests: node.analysis.monthly_requests,
                concurrency: node.analysis.concurrency,
                monthly_cost: node.analysis.cost,
            })
            .collect();
        let total_monthly_cost = functions.iter().filter_map(|f| f.monthly_cost).sum();

        Self {
            functions,
            findings: graph.findings.clone(),
            total_monthly_cost,
        }
    }
}

/// Prints the analysis of a graph.
pub struct CheckResults<'a> {
    graph: &'a CheckGraph,
    format: OutputFormat,
}

impl<'a> CheckResults<'a> {
    /// Printer for `graph` in `format`.
    pub const fn new(graph: &'a CheckGraph, format: OutputFormat) -> Self {
        Self {
            graph,
            format,
        }
    }

    /// Print the analysis to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be serialized.
    pub fn print_bottle_neck_results(&self) -> Result<()> {
        println!("{}", self.render()?);
        Ok(())
    }

    /// The text [`print_bottle_neck_results`](Self::print_bottle_neck_results) prints.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be serialized.
    pub fn render(&self) -> Result<String> {
        let report = CheckReport::from_graph(self.graph);
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => Ok(report.to_string()),
        }
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.functions.is_empty() {
            return write!(f, "No functions found in the application template.");
        }

        writeln!(f, "{}", "Bottleneck analysis".bold())?;
        if self.findings.is_empty() {
            writeln!(f, "  No bottlenecks to report")?;
        }
        // Worst first, recorded order within a severity
        for severity in [Severity::Exceeded, Severity::Red, Severity::Yellow, Severity::Green] {
            for finding in self.findings.iter().filter(|finding| finding.severity == severity) {
                writeln!(f, "  {} {}", marker(severity), finding.message)?;
            }
        }

        writeln!(f, "\n{}", "Monthly cost estimate".bold())?;
        let width = self.functions.iter().map(|function| display_path(function).len()).max().unwrap_or(0);
        for function in &self.functions {
            let requests = function
                .monthly_requests
                .map_or_else(|| "-".to_string(), |r| format!("{r} requests"));
            let cost = function.monthly_cost.map_or_else(|| "-".to_string(), |c| format!("${c:.2}"));
            let sizing = format!("{} MB, {}", function.memory_size, function.architecture);
            writeln!(
                f,
                "  {:<width$}  {sizing:>16}  {requests:>20}  {cost:>10}",
                display_path(function)
            )?;
        }
        write!(f, "  {} ${:.2}", "Total:".bold(), self.total_monthly_cost)
    }
}

fn display_path(function: &FunctionReport) -> String {
    if function.stack_path.is_empty() {
        function.name.clone()
    } else {
        format!("{}/{}", function.stack_path, function.name)
    }
}

fn marker(severity: Severity) -> String {
    match severity {
        Severity::Green => "✓".green().to_string(),
        Severity::Yellow => "⚠".yellow().to_string(),
        Severity::Red => "✗".red().to_string(),
        Severity::Exceeded => "✗".red().bold().to_string(),
    }
}
