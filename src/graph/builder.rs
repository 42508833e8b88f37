//! Building a [`CheckGraph`] from a template file.

use anyhow::Result;
use std::path::Path;

use super::{CheckGraph, GraphNode};
use crate::providers::{FunctionProvider, StackProvider};

/// Graph nodes for every compute function under the template at `path`.
///
/// Nested stacks are included. Nodes are ordered by stack (pre-order) and
/// then by declaration order; resources the graph does not track are skipped.
///
/// # Errors
///
/// Propagates stack loading errors, see [`StackProvider::get_stacks`].
pub fn extract_resources(path: &Path) -> Result<Vec<GraphNode>> {
    let stacks = StackProvider::get_stacks(path)?;
    let nodes: Vec<GraphNode> = FunctionProvider::new(&stacks)
        .get_all()
        .into_iter()
        .map(GraphNode::lambda_function)
        .collect();

    tracing::debug!("Extracted {} function(s) from {} stack(s)", nodes.len(), stacks.len());
    Ok(nodes)
}

/// Wrap `nodes` in a [`CheckGraph`].
///
/// # Errors
///
/// Returns [`CheckError::DuplicateResource`](crate::core::CheckError::DuplicateResource)
/// if two nodes share a stack path and name.
pub fn build_graph(nodes: Vec<GraphNode>) -> Result<CheckGraph> {
    Ok(CheckGraph::new(nodes)?)
}

/// [`extract_resources`] followed by [`build_graph`].
///
/// # Errors
///
/// Any error from either step.
pub fn parse_template(path: &Path) -> Result<CheckGraph> {
    build_graph(extract_resources(path)?)
}
