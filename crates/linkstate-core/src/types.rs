use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Weight of a single directed edge.
pub type Weight = u32;

/// Accumulated cost of a path. Wider than [`Weight`] so that summing up to
/// `N - 1` edge weights can never overflow.
pub type Distance = u64;

/// Identifier of a node in the network.
///
/// Nodes are numbered `1..=N`, where `N` is the node count declared by the
/// input. Zero is never a valid identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a node identifier, rejecting zero.
    pub fn new(id: u32) -> Result<Self, CoreError> {
        if id == 0 {
            return Err(CoreError::InvalidNodeId(
                "node ids start at 1, got 0".into(),
            ));
        }
        Ok(Self(id))
    }

    /// The raw numeric identifier.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Iterate over every node identifier of a `node_count`-node network.
    /// Counts beyond `u32::MAX` stop at the largest representable id.
    pub fn range(node_count: usize) -> impl Iterator<Item = NodeId> {
        let last = u32::try_from(node_count).unwrap_or(u32::MAX);
        (1..=last).map(NodeId)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for NodeId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<u32>()
            .map_err(|e| CoreError::InvalidNodeId(format!("{s:?}: {e}")))?;
        Self::new(id)
    }
}

impl From<NodeId> for u32 {
    fn from(node: NodeId) -> Self {
        node.0
    }
}

/// A directed, weighted edge `from -> to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, weight: Weight) -> Self {
        Self { from, to, weight }
    }
}
