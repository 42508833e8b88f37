//! The resource graph analysed by `samcheck check`.
//!
//! [`parse_template`] loads a template (and its nested stacks), turns every
//! compute function into a [`GraphNode`] and collects them in a
//! [`CheckGraph`]. The graph has no edges: it is an ordered set of
//! nodes that the check stages annotate in place.

pub mod builder;
mod check_graph;
mod node;

pub use builder::{build_graph, extract_resources, parse_template};
pub use check_graph::CheckGraph;
pub use node::{ConcurrencyUsage, GraphNode, NodeAnalysis};
