use linkstate_core::{Distance, NodeId};
use serde::Serialize;

use crate::engine::ShortestPathTree;
use crate::error::RoutingError;
use crate::step::Cell;

/// One row of a forwarding table: traffic from `source` to `destination`
/// leaves over the link to `next_hop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForwardingEntry {
    pub destination: NodeId,
    pub source: NodeId,
    pub next_hop: NodeId,
    /// Total shortest-path cost to `destination`.
    pub distance: Distance,
}

/// First-hop entries for every reachable destination of one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForwardingTable {
    source: NodeId,
    entries: Vec<ForwardingEntry>,
    unreachable: Vec<NodeId>,
}

impl ForwardingTable {
    /// Entry for `destination`, if it is reachable.
    pub fn get(&self, destination: NodeId) -> Option<&ForwardingEntry> {
        self.entries.iter().find(|e| e.destination == destination)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ForwardingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Destinations omitted because no finite path reaches them.
    pub fn unreachable(&self) -> &[NodeId] {
        &self.unreachable
    }
}

impl<'a> IntoIterator for &'a ForwardingTable {
    type Item = &'a ForwardingEntry;
    type IntoIter = std::slice::Iter<'a, ForwardingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Derives first hops from a finished [`ShortestPathTree`].
///
/// A destination's immediate predecessor is the one recorded in the last
/// round before its cell turns [`Cell::Settled`]. Following predecessors
/// back to the source yields the path; the node just before the source is
/// the first hop. Walks are bounded by `N - 1` hops.
pub struct ForwardingResolver<'a> {
    tree: &'a ShortestPathTree,
}

impl<'a> ForwardingResolver<'a> {
    pub fn new(tree: &'a ShortestPathTree) -> Self {
        Self { tree }
    }

    fn max_hops(&self) -> usize {
        self.tree.node_count().saturating_sub(1)
    }

    /// Immediate predecessor of `node` on its shortest path.
    pub fn predecessor(&self, node: NodeId) -> Result<NodeId, RoutingError> {
        if node == self.tree.source() || node.get() as usize > self.tree.node_count() {
            return Err(RoutingError::UnknownDestination { node });
        }

        let steps = self.tree.steps();
        steps
            .settled_at(node)
            .and_then(|round| round.checked_sub(1))
            .and_then(|round| steps.cell(round, node))
            .and_then(Cell::predecessor)
            .ok_or(RoutingError::UnreachableDestination { destination: node })
    }

    /// The source's neighbour on the shortest path to `destination`.
    pub fn first_hop(&self, destination: NodeId) -> Result<NodeId, RoutingError> {
        let source = self.tree.source();
        let mut hop = destination;

        for _ in 0..self.max_hops() {
            let pred = self.chain_step(destination, hop)?;
            if pred == source {
                return Ok(hop);
            }
            hop = pred;
        }

        Err(RoutingError::PredecessorCycle {
            destination,
            max_hops: self.max_hops(),
        })
    }

    /// Full node path from the source to `destination`, both included.
    pub fn path(&self, destination: NodeId) -> Result<Vec<NodeId>, RoutingError> {
        let source = self.tree.source();
        let mut path = vec![destination];
        let mut hop = destination;

        for _ in 0..self.max_hops() {
            let pred = self.chain_step(destination, hop)?;
            path.push(pred);
            if pred == source {
                path.reverse();
                return Ok(path);
            }
            hop = pred;
        }

        Err(RoutingError::PredecessorCycle {
            destination,
            max_hops: self.max_hops(),
        })
    }

    /// One step back along `destination`'s chain. A broken link anywhere on
    /// the chain makes the destination itself unreachable.
    fn chain_step(&self, destination: NodeId, hop: NodeId) -> Result<NodeId, RoutingError> {
        self.predecessor(hop).map_err(|e| match e {
            RoutingError::UnknownDestination { .. } if hop == destination => e,
            _ => RoutingError::UnreachableDestination { destination },
        })
    }

    /// Build the forwarding table for every destination of the tree.
    pub fn resolve(&self) -> ForwardingTable {
        let source = self.tree.source();
        let mut entries = Vec::new();
        let mut unreachable = Vec::new();

        for destination in self.tree.destinations() {
            let resolved = self.first_hop(destination).and_then(|next_hop| {
                self.tree
                    .distance(destination)
                    .map(|distance| (next_hop, distance))
                    .ok_or(RoutingError::UnreachableDestination { destination })
            });

            match resolved {
                Ok((next_hop, distance)) => entries.push(ForwardingEntry {
                    destination,
                    source,
                    next_hop,
                    distance,
                }),
                Err(e) if e.is_unreachable() => {
                    tracing::debug!(%destination, "no finite path, omitting destination");
                    unreachable.push(destination);
                }
                Err(e) => {
                    // A broken predecessor chain means the step table is inconsistent.
                    tracing::warn!(%destination, error = %e, "omitting destination from forwarding table");
                    unreachable.push(destination);
                }
            }
        }

        tracing::debug!(
            %source,
            entries = entries.len(),
            unreachable = unreachable.len(),
            "forwarding table resolved"
        );

        ForwardingTable {
            source,
            entries,
            unreachable,
        }
    }
}
