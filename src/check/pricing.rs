//! Monthly volume questions.
//!
//! Writes `monthly_requests` for every node and `duration_ms` for nodes that
//! are not entry points.

use anyhow::Result;

use super::prompt::{Prompter, Question, ask_count, ask_number};
use crate::constants::SECONDS_PER_MONTH;
use crate::graph::CheckGraph;

/// Asks for the request volume of every function.
pub struct CheckPricing<'a> {
    graph: &'a mut CheckGraph,
}

impl<'a> CheckPricing<'a> {
    /// Stage over `graph`.
    pub const fn new(graph: &'a mut CheckGraph) -> Self {
        Self {
            graph,
        }
    }

    /// Ask `<path>.requests` for every node, and `<path>.duration` where no
    /// duration is known yet.
    ///
    /// The request default is derived from the node's TPS over a 30-day
    /// month; nodes without TPS have no default.
    ///
    /// # Errors
    ///
    /// Any prompting error.
    pub async fn ask_pricing_questions<P: Prompter>(&mut self, prompter: &mut P) -> Result<()> {
        for node in self.graph.nodes_mut() {
            let path = node.resource.full_path();

            let mut requests = Question::new(
                format!("{path}.requests"),
                format!("Expected requests per month for {path}"),
            );
            if let Some(tps) = node.analysis.tps {
                requests = requests.with_default(monthly_requests(tps).to_string());
            }
            node.analysis.monthly_requests = Some(ask_count(prompter, &requests).await?);

            if node.analysis.duration_ms.is_none() {
                let duration = Question::new(
                    format!("{path}.duration"),
                    format!("Expected duration of {path} in milliseconds"),
                )
                .with_default(node.timeout_ms().to_string());
                node.analysis.duration_ms = Some(ask_number(prompter, &duration).await?);
            }
        }

        Ok(())
    }
}

/// Requests in a 30-day month at a steady `tps`.
#[must_use]
pub fn monthly_requests(tps: f64) -> u64 {
    (tps * SECONDS_PER_MONTH as f64).round() as u64
}
