//! Entry point and load questions.
//!
//! Writes `entry_point`, `tps` and `duration_ms` of [`NodeAnalysis`](crate::graph::NodeAnalysis).

use anyhow::Result;

use super::prompt::{Prompter, Question, ask_number};
use crate::core::CheckError;
use crate::graph::{CheckGraph, GraphNode};

/// Question key for the entry point selection.
pub const ENTRY_POINTS_KEY: &str = "entry_points";

const HTTP_EVENT_TYPES: &[&str] = &["Api", "HttpApi"];

/// Asks which functions receive traffic and how much.
pub struct BottleNecks<'a> {
    graph: &'a mut CheckGraph,
}

impl<'a> BottleNecks<'a> {
    /// Stage over `graph`.
    pub const fn new(graph: &'a mut CheckGraph) -> Self {
        Self {
            graph,
        }
    }

    /// Ask for the entry points, then for the TPS and duration of each.
    ///
    /// Entry points are given as comma-separated function paths or 1-based
    /// indices. The default selects the functions with an HTTP event, or
    /// every function when none has one. An empty graph asks nothing.
    ///
    /// # Errors
    ///
    /// [`CheckError::InvalidAnswer`] for an unknown function or an empty
    /// selection, and any prompting error.
    pub async fn ask_entry_point_question<P: Prompter>(&mut self, prompter: &mut P) -> Result<()> {
        if self.graph.is_empty() {
            tracing::info!("No functions found, skipping bottleneck questions");
            return Ok(());
        }

        let question = entry_point_question(self.graph.nodes());
        let answer = prompter.ask(&question).await?;
        let selected = select_entry_points(self.graph.nodes(), &answer)?;

        for (position, node) in self.graph.nodes_mut().iter_mut().enumerate() {
            if !selected.contains(&position) {
                continue;
            }
            let path = node.resource.full_path();
            let timeout_ms = node.timeout_ms();

            let tps = ask_number(
                prompter,
                &Question::new(format!("{path}.tps"), format!("Expected requests per second for {path}")),
            )
            .await?;
            let duration = ask_number(
                prompter,
                &Question::new(
                    format!("{path}.duration"),
                    format!("Expected duration of {path} in milliseconds"),
                )
                .with_default(timeout_ms.to_string()),
            )
            .await?;

            node.analysis.entry_point = true;
            node.analysis.tps = Some(tps);
            node.analysis.duration_ms = Some(duration);
        }

        tracing::debug!("Selected {} entry point(s)", self.graph.entry_points().count());
        Ok(())
    }
}

fn entry_point_question(nodes: &[GraphNode]) -> Question {
    let listing = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| format!("  {}) {}", i + 1, node.resource.full_path()))
        .collect::<Vec<_>>()
        .join("\n");

    let http: Vec<String> = nodes
        .iter()
        .filter(|node| {
            node.resource.event_types.iter().any(|event| HTTP_EVENT_TYPES.contains(&event.as_str()))
        })
        .map(|node| node.resource.full_path())
        .collect();
    let default = if http.is_empty() {
        nodes.iter().map(|node| node.resource.full_path()).collect()
    } else {
        http
    };

    Question::new(
        ENTRY_POINTS_KEY,
        format!("Functions:\n{listing}\nWhich functions receive external traffic? (comma-separated)"),
    )
    .with_default(default.join(","))
}

/// Positions of the selected nodes, in graph order.
fn select_entry_points(nodes: &[GraphNode], answer: &str) -> Result<Vec<usize>, CheckError> {
    let mut selected = Vec::new();

    for token in answer.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let position = token
            .parse::<usize>()
            .ok()
            .filter(|&index| (1..=nodes.len()).contains(&index))
            .map(|index| index - 1)
            .or_else(|| nodes.iter().position(|node| node.resource.full_path() == token))
            .ok_or_else(|| CheckError::InvalidAnswer {
                key: ENTRY_POINTS_KEY.to_string(),
                answer: token.to_string(),
            })?;
        if !selected.contains(&position) {
            selected.push(position);
        }
    }

    if selected.is_empty() {
        return Err(CheckError::InvalidAnswer {
            key: ENTRY_POINTS_KEY.to_string(),
            answer: answer.to_string(),
        });
    }

    selected.sort_unstable();
    Ok(selected)
}
