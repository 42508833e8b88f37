//! Concurrency and cost calculations.
//!
//! Writes `concurrency` and `cost` of every node it can compute them for and
//! appends [`Finding`]s to the graph.

use serde::Serialize;
use std::fmt;

use crate::config::{GlobalConfig, PricingRates};
use crate::constants::{GREEN_CAPACITY_PERCENT, YELLOW_CAPACITY_PERCENT};
use crate::graph::{CheckGraph, ConcurrencyUsage, GraphNode};
use crate::providers::Architecture;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Within comfortable limits.
    Green,
    /// Approaching a limit.
    Yellow,
    /// At a limit, or misconfigured.
    Red,
    /// Over the limit.
    Exceeded,
}

impl Severity {
    /// Severity of using `percent` of the concurrency limit.
    ///
    /// ```rust
    /// use samcheck_cli::check::Severity;
    ///
    /// assert_eq!(Severity::from_capacity(70), Severity::Green);
    /// assert_eq!(Severity::from_capacity(89), Severity::Yellow);
    /// assert_eq!(Severity::from_capacity(100), Severity::Red);
    /// assert_eq!(Severity::from_capacity(101), Severity::Exceeded);
    /// ```
    #[must_use]
    pub const fn from_capacity(percent: u64) -> Self {
        if percent <= GREEN_CAPACITY_PERCENT {
            Self::Green
        } else if percent < YELLOW_CAPACITY_PERCENT {
            Self::Yellow
        } else if percent <= 100 {
            Self::Red
        } else {
            Self::Exceeded
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Exceeded => "exceeded",
        };
        f.write_str(name)
    }
}

/// Something the calculation noticed about a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// `stack_path/name` of the function.
    pub resource: String,
    /// Severity.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

/// Account settings the calculations depend on.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckSettings {
    /// Account concurrent execution limit.
    pub concurrency_limit: u32,
    /// Lambda pricing.
    pub pricing: PricingRates,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self::from(&GlobalConfig::default())
    }
}

impl From<&GlobalConfig> for CheckSettings {
    fn from(config: &GlobalConfig) -> Self {
        Self {
            concurrency_limit: config.concurrency_limit,
            pricing: config.pricing.clone(),
        }
    }
}

/// Runs the calculations over an annotated graph.
pub struct CheckCalculation<'a> {
    graph: &'a mut CheckGraph,
    settings: &'a CheckSettings,
}

impl<'a> CheckCalculation<'a> {
    /// Stage over `graph` with `settings`.
    pub const fn new(graph: &'a mut CheckGraph, settings: &'a CheckSettings) -> Self {
        Self {
            graph,
            settings,
        }
    }

    /// Compute concurrency, timeout and cost findings for every node.
    ///
    /// Nodes missing the inputs for a calculation are skipped for it.
    pub fn run_bottle_neck_calculations(&mut self) {
        let mut findings = Vec::new();

        for node in self.graph.nodes_mut() {
            let path = node.resource.full_path();

            if let (Some(tps), Some(duration)) = (node.analysis.tps, node.analysis.duration_ms) {
                let usage = concurrency_usage(tps, duration, self.settings.concurrency_limit);
                findings.push(Finding {
                    resource: path.clone(),
                    severity: Severity::from_capacity(usage.capacity_percent),
                    message: format!(
                        "{path} needs {} concurrent executions, {}% of the account limit of {}",
                        usage.required, usage.capacity_percent, self.settings.concurrency_limit
                    ),
                });
                node.analysis.concurrency = Some(usage);
            }

            if let Some(duration) = node.analysis.duration_ms.filter(|&d| d > node.timeout_ms()) {
                findings.push(Finding {
                    resource: path.clone(),
                    severity: Severity::Red,
                    message: format!(
                        "{path} expected duration of {duration} ms exceeds its timeout of {} ms",
                        node.timeout_ms()
                    ),
                });
            }

            node.analysis.cost = monthly_cost(node, &self.settings.pricing);
        }

        tracing::debug!("Calculation produced {} finding(s)", findings.len());
        self.graph.findings.extend(findings);
    }
}

/// Concurrency needed to serve `tps` requests per second lasting `duration_ms`.
#[must_use]
pub fn concurrency_usage(tps: f64, duration_ms: f64, concurrency_limit: u32) -> ConcurrencyUsage {
    let required = (tps * duration_ms / 1000.0).ceil() as u64;
    let limit = f64::from(concurrency_limit.max(1));
    ConcurrencyUsage {
        required,
        capacity_percent: (required as f64 / limit * 100.0).round() as u64,
    }
}

/// Monthly cost of `node`, when its requests and duration are known.
#[must_use]
pub fn monthly_cost(node: &GraphNode, pricing: &PricingRates) -> Option<f64> {
    let requests = node.analysis.monthly_requests? as f64;
    let duration_secs = node.analysis.duration_ms? / 1000.0;
    let memory_gb = f64::from(node.resource.memory_size) / 1024.0;
    let gb_second_price = match node.resource.architecture {
        Architecture::X86_64 => pricing.gb_second_price_x86,
        Architecture::Arm64 => pricing.gb_second_price_arm,
    };

    let request_cost = requests / 1_000_000.0 * pricing.request_price_per_million;
    let compute_cost = requests * duration_secs * memory_gb * gb_second_price;
    Some(request_cost + compute_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{function, graph_of};

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(Severity::from_capacity(0), Severity::Green);
        assert_eq!(Severity::from_capacity(70), Severity::Green);
        assert_eq!(Severity::from_capacity(71), Severity::Yellow);
        assert_eq!(Severity::from_capacity(89), Severity::Yellow);
        assert_eq!(Severity::from_capacity(90), Severity::Red);
        assert_eq!(Severity::from_capacity(100), Severity::Red);
        assert_eq!(Severity::from_capacity(101), Severity::Exceeded);
    }

    #[test]
    fn test_concurrency_usage() {
        let usage = concurrency_usage(100.0, 250.0, 1000);
        assert_eq!(usage.required, 25);
        assert_eq!(usage.capacity_percent, 3);

        // Partial executions round up
        assert_eq!(concurrency_usage(3.0, 100.0, 1000).required, 1);

        let usage = concurrency_usage(1000.0, 950.0, 1000);
        assert_eq!(usage.required, 950);
        assert_eq!(usage.capacity_percent, 95);
    }

    #[test]
    fn test_monthly_cost() {
        let mut node = GraphNode::lambda_function(function("", "FnA"));
        node.resource.memory_size = 1024;
        node.analysis.monthly_requests = Some(1_000_000);
        node.analysis.duration_ms = Some(1000.0);

        let pricing = PricingRates::default();
        let cost = monthly_cost(&node, &pricing).unwrap();
        let expected = 0.20 + 1_000_000.0 * pricing.gb_second_price_x86;
        assert!((cost - expected).abs() < 1e-9, "{cost} != {expected}");

        node.resource.architecture = Architecture::Arm64;
        let arm = monthly_cost(&node, &pricing).unwrap();
        assert!(arm < cost);

        node.analysis.monthly_requests = None;
        assert!(monthly_cost(&node, &pricing).is_none());
    }

    #[test]
    fn test_calculations_annotate_and_record_findings() {
        let mut graph = graph_of(vec![function("", "Hot"), function("", "Slow"), function("", "Idle")]);
        {
            let nodes = graph.nodes_mut();
            nodes[0].analysis.tps = Some(950.0);
            nodes[0].analysis.duration_ms = Some(1000.0);
            nodes[0].analysis.monthly_requests = Some(10);
            nodes[1].analysis.duration_ms = Some(5000.0);
        }
        let settings = CheckSettings::default();

        CheckCalculation::new(&mut graph, &settings).run_bottle_neck_calculations();

        let severities: Vec<(&str, Severity)> =
            graph.findings.iter().map(|f| (f.resource.as_str(), f.severity)).collect();
        assert_eq!(severities, vec![("Hot", Severity::Red), ("Slow", Severity::Red)]);
        assert!(graph.findings[1].message.contains("exceeds its timeout of 3000 ms"));

        let hot = &graph.nodes()[0].analysis;
        assert_eq!(hot.concurrency.map(|c| c.capacity_percent), Some(95));
        assert!(hot.cost.is_some());
        assert!(graph.nodes()[2].analysis.concurrency.is_none());
        assert!(graph.nodes()[2].analysis.cost.is_none());
    }
}
