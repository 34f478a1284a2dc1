use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Edge, NodeId, Weight};

/// How a lookup treats an ordered pair with no loaded edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingEdgePolicy {
    /// No edge means no link: the pair is unreachable in one hop.
    #[default]
    Unreachable,
    /// No edge costs nothing. Reproduces the classic tool, where every
    /// non-adjacent pair behaves as if joined by a zero-weight link.
    Zero,
}

/// In-memory directed, weighted network.
///
/// Edges are indexed by `(from, to)`. Inserting in load order makes the
/// most recently loaded duplicate win, which is the only duplicate a
/// lookup may ever observe. The graph is never mutated once loading ends.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    node_count: usize,
    edges: HashMap<(NodeId, NodeId), Weight>,
    /// Number of edge records loaded, duplicates included.
    edge_lines: usize,
}

impl Graph {
    /// Create an empty graph of `node_count` nodes. Node ids are `u32`, so
    /// larger counts are capped at `u32::MAX`.
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count: node_count.min(u32::MAX as usize),
            edges: HashMap::new(),
            edge_lines: 0,
        }
    }

    /// Build a graph from edges given in load order.
    pub fn load(node_count: usize, edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut graph = Self::new(node_count);
        for edge in edges {
            graph.insert(edge);
        }
        graph
    }

    /// Insert or overwrite the edge `edge.from -> edge.to`. Returns the
    /// weight it replaced, if any.
    pub fn insert(&mut self, edge: Edge) -> Option<Weight> {
        self.edge_lines += 1;
        let previous = self.edges.insert((edge.from, edge.to), edge.weight);
        if let Some(old) = previous {
            tracing::trace!(
                from = %edge.from,
                to = %edge.to,
                old,
                new = edge.weight,
                "duplicate edge overrides earlier weight"
            );
        }
        previous
    }

    /// Declared number of nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of distinct ordered pairs with an edge.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of edge records loaded, including overridden duplicates.
    pub fn loaded_edges(&self) -> usize {
        self.edge_lines
    }

    /// Whether `node` lies within `1..=N`.
    pub fn contains(&self, node: NodeId) -> bool {
        (node.get() as usize) <= self.node_count
    }

    /// All node identifiers in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        NodeId::range(self.node_count)
    }

    /// Weight of the edge `a -> b`, or 0 when no such edge was loaded.
    ///
    /// A zero result does not imply an edge exists; use [`Graph::edge`]
    /// when absence matters.
    pub fn weight(&self, a: NodeId, b: NodeId) -> Weight {
        self.edge(a, b).unwrap_or(0)
    }

    /// Weight of the edge `a -> b`, if one was loaded.
    pub fn edge(&self, a: NodeId, b: NodeId) -> Option<Weight> {
        self.edges.get(&(a, b)).copied()
    }

    /// One-hop cost from `a` to `b` under `policy`. `None` means unreachable.
    pub fn link_cost(&self, a: NodeId, b: NodeId, policy: MissingEdgePolicy) -> Option<Weight> {
        match (self.edge(a, b), policy) {
            (Some(weight), _) => Some(weight),
            (None, MissingEdgePolicy::Zero) => Some(0),
            (None, MissingEdgePolicy::Unreachable) => None,
        }
    }

    /// Out-edges of `node`, sorted by destination.
    pub fn neighbors(&self, node: NodeId) -> Vec<Edge> {
        let mut out: Vec<Edge> = self
            .edges
            .iter()
            .filter(|((from, _), _)| *from == node)
            .map(|(&(from, to), &weight)| Edge::new(from, to, weight))
            .collect();
        out.sort_by_key(|e| e.to);
        out
    }
}
