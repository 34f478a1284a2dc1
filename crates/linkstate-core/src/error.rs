use std::path::PathBuf;

/// Errors raised while building a [`Graph`](crate::Graph) from input data.
///
/// Every variant means the input is malformed or unavailable; nothing is
/// computed once one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("input is empty: missing node count line")]
    MissingNodeCount,

    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    #[error("cannot read input file {path}")]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid node id: {0}")]
    InvalidNodeId(String),
}
