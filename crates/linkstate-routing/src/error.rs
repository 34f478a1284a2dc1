use linkstate_core::NodeId;

/// Errors that can occur within the routing layer.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("invalid source node {node}: network has {node_count} node(s)")]
    InvalidSourceNode { node: u32, node_count: usize },

    #[error("destination {destination} is unreachable")]
    UnreachableDestination { destination: NodeId },

    #[error("predecessor chain for {destination} did not reach the source within {max_hops} hops")]
    PredecessorCycle { destination: NodeId, max_hops: usize },

    #[error("node {node} is not a destination of this computation")]
    UnknownDestination { node: NodeId },
}

impl RoutingError {
    /// True when the destination simply has no finite path from the source,
    /// as opposed to a step table that cannot be walked.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, RoutingError::UnreachableDestination { .. })
    }
}
