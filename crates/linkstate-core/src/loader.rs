//! Edge-list input format.
//!
//! ```text
//! 3          <- node count N
//! 1 2 5      <- from to weight, one directed edge per line
//! 1 3 9
//! 2 3 2
//! ```

use std::path::Path;

use crate::error::CoreError;
use crate::graph::Graph;
use crate::types::{Edge, NodeId, Weight};

/// Read and parse an edge-list file.
pub fn load_edge_list(path: &Path) -> Result<Graph, CoreError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CoreError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = parse_edge_list(&contents)?;
    tracing::debug!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded edge list"
    );
    Ok(graph)
}

/// Parse an edge list: the node count on the first line, then one
/// `from to weight` triple per line. Blank lines are ignored.
pub fn parse_edge_list(input: &str) -> Result<Graph, CoreError> {
    let mut lines = input.lines().enumerate();

    let node_count = match lines.next() {
        Some((_, line)) if !line.trim().is_empty() => {
            // Node ids are u32, so the count must fit one too.
            line.trim()
                .parse::<u32>()
                .map_err(|e| CoreError::MalformedInput {
                    line: 1,
                    reason: format!("node count {:?} is not a valid count: {e}", line.trim()),
                })? as usize
        }
        _ => return Err(CoreError::MissingNodeCount),
    };

    let mut graph = Graph::new(node_count);
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let edge = parse_edge(line, idx + 1)?;
        for endpoint in [edge.from, edge.to] {
            if !graph.contains(endpoint) {
                return Err(CoreError::MalformedInput {
                    line: idx + 1,
                    reason: format!("node {endpoint} is outside 1..={node_count}"),
                });
            }
        }
        graph.insert(edge);
    }

    Ok(graph)
}

fn parse_edge(line: &str, line_no: usize) -> Result<Edge, CoreError> {
    let malformed = |reason: String| CoreError::MalformedInput {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [from, to, weight] = fields.as_slice() else {
        return Err(malformed(format!(
            "expected `from to weight`, got {} field(s)",
            fields.len()
        )));
    };

    let from: NodeId = from.parse().map_err(|e| malformed(format!("bad source node: {e}")))?;
    let to: NodeId = to.parse().map_err(|e| malformed(format!("bad target node: {e}")))?;
    let weight: Weight = weight
        .parse()
        .map_err(|e| malformed(format!("bad weight {weight:?}: {e}")))?;

    Ok(Edge::new(from, to, weight))
}
