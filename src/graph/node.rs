//! Graph nodes and their analysis annotations.

use serde::Serialize;

use crate::core::ResourceKind;
use crate::providers::Function;

/// Concurrency needed by a function at its expected load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConcurrencyUsage {
    /// Concurrent executions needed (`ceil(tps × duration)`).
    pub required: u64,
    /// `required` as a rounded percentage of the account concurrency limit.
    pub capacity_percent: u64,
}

/// Values collected and computed for a node by the check stages.
///
/// Everything starts empty. Each stage documents the fields it writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeAnalysis {
    /// Whether the function receives external traffic directly.
    pub entry_point: bool,
    /// Expected arrival rate in requests per second.
    pub tps: Option<f64>,
    /// Expected execution duration in milliseconds.
    pub duration_ms: Option<f64>,
    /// Expected requests per month.
    pub monthly_requests: Option<u64>,
    /// Concurrency needed at `tps`.
    pub concurrency: Option<ConcurrencyUsage>,
    /// Estimated monthly cost in USD.
    pub cost: Option<f64>,
}

/// One resource in the [`CheckGraph`](super::CheckGraph).
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// Kind of the wrapped resource.
    pub kind: ResourceKind,
    /// Display name (the logical id).
    pub name: String,
    /// The wrapped function.
    pub resource: Function,
    /// Annotations written by the check stages.
    pub analysis: NodeAnalysis,
}

impl GraphNode {
    /// Node for a compute function, named after its logical id.
    #[must_use]
    pub fn lambda_function(function: Function) -> Self {
        Self {
            kind: ResourceKind::LambdaFunction,
            name: function.name.clone(),
            resource: function,
            analysis: NodeAnalysis::default(),
        }
    }

    /// Stack path of the wrapped resource.
    #[must_use]
    pub fn stack_path(&self) -> &str {
        &self.resource.stack_path
    }

    /// Configured timeout in milliseconds.
    #[must_use]
    pub fn timeout_ms(&self) -> f64 {
        f64::from(self.resource.timeout) * 1000.0
    }
}
