//! Final assembly: merge backbone nodes, alt nodes, and edges into one
//! validated [`Graph`] value owned by the caller.

use crate::errors::BuildError;
use crate::graph::{Edge, Graph, Node};

/// Merge and validate. Every node id must be positive and unique across
/// the whole graph, and every edge must reference two present nodes.
/// Violations are fatal: they indicate a builder defect, not bad input.
pub fn assemble(
    backbone: Vec<Node>,
    alt_nodes: Vec<Node>,
    edges: Vec<Edge>,
) -> Result<Graph, BuildError> {
    let mut graph = Graph::new();

    for node in backbone.into_iter().chain(alt_nodes) {
        if node.id == 0 {
            return Err(BuildError::InvariantViolation(format!(
                "node {} has id 0",
                node.label
            )));
        }
        if let Some(existing) = graph.nodes.insert(node.id, node) {
            return Err(BuildError::InvariantViolation(format!(
                "duplicate node id {} ({})",
                existing.id, existing.label
            )));
        }
    }

    for edge in edges {
        for endpoint in [edge.from, edge.to] {
            if !graph.nodes.contains_key(&endpoint) {
                return Err(BuildError::InvariantViolation(format!(
                    "edge {} -> {} references unknown node {}",
                    edge.from, edge.to, endpoint
                )));
            }
        }
        graph.edges.insert(edge);
    }

    Ok(graph)
}
