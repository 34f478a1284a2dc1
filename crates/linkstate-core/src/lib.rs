pub mod error;
pub mod graph;
pub mod loader;
pub mod types;

pub use error::CoreError;
pub use graph::{Graph, MissingEdgePolicy};
pub use loader::{load_edge_list, parse_edge_list};
pub use types::{Distance, Edge, NodeId, Weight};
