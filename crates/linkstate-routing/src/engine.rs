use std::collections::BTreeMap;

use linkstate_core::{Distance, Graph, MissingEdgePolicy, NodeId};
use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::step::{Cell, Round, StepTable};

/// Configuration for the link-state engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How a pair with no loaded edge is costed.
    #[serde(default)]
    pub missing_edge: MissingEdgePolicy,
}

/// Result of one link-state run from a single source.
#[derive(Debug, Clone, Serialize)]
pub struct ShortestPathTree {
    pub(crate) source: NodeId,
    pub(crate) node_count: usize,
    /// N': nodes in the order they were confirmed, source first.
    pub(crate) confirmed: Vec<NodeId>,
    /// Final distance of every confirmed node.
    pub(crate) distances: BTreeMap<NodeId, Distance>,
    pub(crate) steps: StepTable,
}

impl ShortestPathTree {
    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Confirmation order. The source is always first.
    pub fn confirmed(&self) -> &[NodeId] {
        &self.confirmed
    }

    pub fn is_confirmed(&self, node: NodeId) -> bool {
        self.distances.contains_key(&node)
    }

    /// Shortest distance from the source, if `node` was confirmed.
    pub fn distance(&self, node: NodeId) -> Option<Distance> {
        self.distances.get(&node).copied()
    }

    /// Distances of all confirmed nodes, by node id.
    pub fn distances(&self) -> &BTreeMap<NodeId, Distance> {
        &self.distances
    }

    pub fn steps(&self) -> &StepTable {
        &self.steps
    }

    /// Every node except the source, ascending.
    pub fn destinations(&self) -> impl Iterator<Item = NodeId> + '_ {
        NodeId::range(self.node_count).filter(move |node| *node != self.source)
    }

    /// N' as it stood during round `index`.
    pub fn confirmed_through(&self, index: usize) -> &[NodeId] {
        let end = (index + 1).min(self.confirmed.len());
        &self.confirmed[..end]
    }
}

/// Runs the iterative link-state (Dijkstra) computation, recording every
/// round so the result can be printed as an N', D(v), p(v) table.
///
/// Each round relaxes every unconfirmed destination through the node
/// confirmed last, then confirms the unconfirmed node with the smallest
/// finite tentative distance (lowest id on ties). The run is single
/// threaded; each round depends on the one before it.
#[derive(Debug, Clone, Default)]
pub struct LinkStateEngine {
    config: EngineConfig,
}

impl LinkStateEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Check a raw source id against the graph.
    pub fn validate_source(graph: &Graph, raw: u32) -> Result<NodeId, RoutingError> {
        let invalid = || RoutingError::InvalidSourceNode {
            node: raw,
            node_count: graph.node_count(),
        };
        let node = NodeId::new(raw).map_err(|_| invalid())?;
        if !graph.contains(node) {
            return Err(invalid());
        }
        Ok(node)
    }

    /// Compute the step table and confirmation order from `source`.
    ///
    /// Runs one round per node. A network with no destinations yields an
    /// empty table.
    pub fn run(&self, graph: &Graph, source: NodeId) -> Result<ShortestPathTree, RoutingError> {
        let source = Self::validate_source(graph, source.get())?;

        let mut tree = ShortestPathTree {
            source,
            node_count: graph.node_count(),
            confirmed: vec![source],
            distances: BTreeMap::from([(source, 0)]),
            steps: StepTable::default(),
        };

        if tree.destinations().next().is_none() {
            tracing::debug!(%source, "no destinations, nothing to compute");
            return Ok(tree);
        }

        let mut current = source;
        let mut current_cost: Distance = 0;
        let mut exhausted = false;

        for index in 0..graph.node_count() {
            let round = self.relax(graph, &tree, current, current_cost, exhausted);
            tracing::trace!(round = index, %current, cells = round.len(), "relaxed round");

            if !exhausted {
                match select_next(&round) {
                    Some((node, distance)) => {
                        tracing::debug!(round = index, %node, distance, "confirmed node");
                        tree.confirmed.push(node);
                        tree.distances.insert(node, distance);
                        current = node;
                        current_cost = distance;
                    }
                    None => {
                        tracing::debug!(round = index, "no reachable nodes left to confirm");
                        exhausted = true;
                    }
                }
            }

            tree.steps.push(round);
        }

        tracing::debug!(
            %source,
            rounds = tree.steps.len(),
            confirmed = tree.confirmed.len(),
            "link-state computation finished"
        );
        Ok(tree)
    }

    /// Build the next round from the last recorded one.
    fn relax(
        &self,
        graph: &Graph,
        tree: &ShortestPathTree,
        current: NodeId,
        current_cost: Distance,
        exhausted: bool,
    ) -> Round {
        let previous = tree.steps.rounds().last();
        let mut round = Round::default();

        for dest in tree.destinations() {
            let prior = previous.and_then(|r| r.get(dest)).copied();

            let cell = if tree.is_confirmed(dest) {
                Cell::Settled
            } else if exhausted {
                // Padding: an unconfirmed node stays as it was.
                prior.unwrap_or(Cell::Unreached {
                    predecessor: current,
                })
            } else {
                let candidate = graph
                    .link_cost(current, dest, self.config.missing_edge)
                    .map(|weight| current_cost + Distance::from(weight));

                match (prior, candidate) {
                    (Some(Cell::Tentative { distance, .. }), Some(c)) if c < distance => {
                        Cell::Tentative {
                            distance: c,
                            predecessor: current,
                        }
                    }
                    (Some(Cell::Unreached { .. }) | None, Some(c)) => Cell::Tentative {
                        distance: c,
                        predecessor: current,
                    },
                    (None, None) => Cell::Unreached {
                        predecessor: current,
                    },
                    (Some(kept), _) => kept,
                }
            };

            round.insert(dest, cell);
        }

        round
    }
}

/// Smallest finite tentative distance in the round; the first node seen
/// wins ties.
fn select_next(round: &Round) -> Option<(NodeId, Distance)> {
    let mut best: Option<(NodeId, Distance)> = None;
    for (node, cell) in round.cells() {
        if let Some(distance) = cell.distance() {
            if best.map_or(true, |(_, shortest)| distance < shortest) {
                best = Some((node, distance));
            }
        }
    }
    best
}
