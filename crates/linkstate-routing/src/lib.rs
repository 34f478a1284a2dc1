//! Linkstate Routing — link-state shortest paths and forwarding tables.
//!
//! This crate provides:
//! - [`LinkStateEngine`] — the iterative N', D(v), p(v) computation that
//!   confirms one node per round and records every round in a [`StepTable`].
//! - [`ShortestPathTree`] — the engine's result: confirmation order, settled
//!   distances, and the step table.
//! - [`ForwardingResolver`] — walks predecessor chains in the step table to
//!   derive the first hop toward every destination.
//! - [`ForwardingTable`] — the per-destination first-hop entries.

pub mod engine;
pub mod error;
pub mod forwarding;
pub mod step;

// Re-exports for convenience.
pub use engine::{EngineConfig, LinkStateEngine, ShortestPathTree};
pub use error::RoutingError;
pub use forwarding::{ForwardingEntry, ForwardingResolver, ForwardingTable};
pub use step::{Cell, Round, StepTable};
