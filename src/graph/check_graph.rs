use std::collections::HashSet;

use super::GraphNode;
use crate::check::calculation::Finding;
use crate::core::CheckError;

/// All resources of an application, in extraction order.
///
/// Built once per run and then annotated in place by the check stages.
/// No two nodes share a stack path and logical id.
#[derive(Debug, Clone, Default)]
pub struct CheckGraph {
    nodes: Vec<GraphNode>,
    /// Findings recorded by the calculation stage, in the order they were found.
    pub findings: Vec<Finding>,
}

impl CheckGraph {
    /// Graph over `nodes`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::DuplicateResource`] for the first node whose
    /// identity was already taken.
    pub fn new(nodes: Vec<GraphNode>) -> Result<Self, CheckError> {
        {
            let mut seen = HashSet::with_capacity(nodes.len());
            for node in &nodes {
                if !seen.insert((node.stack_path(), node.resource.name.as_str())) {
                    return Err(CheckError::DuplicateResource {
                        stack_path: node.stack_path().to_string(),
                        name: node.resource.name.clone(),
                    });
                }
            }
        }

        Ok(Self {
            nodes,
            findings: Vec::new(),
        })
    }

    /// Nodes in extraction order.
    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Mutable nodes in extraction order.
    ///
    /// Node identities cannot change through this slice: only annotations are
    /// meant to be written.
    pub fn nodes_mut(&mut self) -> &mut [GraphNode] {
        &mut self.nodes
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes marked as entry points, in extraction order.
    pub fn entry_points(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|node| node.analysis.entry_point)
    }
}
