//! Error types for the sparsifier constructions

use thiserror::Error;

/// Result type for sparsifier operations
pub type Result<T> = std::result::Result<T, SparsifierError>;

/// Errors that can occur while building a sparsifier
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SparsifierError {
    /// Edge capacity is non-finite or not positive
    #[error("Invalid capacity {capacity} on edge ({u}, {v})")]
    InvalidCapacity {
        /// First endpoint of the offending edge
        u: u64,
        /// Second endpoint of the offending edge
        v: u64,
        /// The rejected capacity value
        capacity: f64,
    },

    /// Self-loop or otherwise malformed edge
    #[error("Invalid edge: ({0}, {1})")]
    InvalidEdge(u64, u64),

    /// Edge already exists
    #[error("Edge already exists: ({0}, {1})")]
    EdgeExists(u64, u64),

    /// Terminal set is empty
    #[error("Terminal set is empty")]
    EmptyTerminalSet,

    /// Terminal is not a vertex of the graph
    #[error("Terminal {0} is not a vertex of the graph")]
    UnknownTerminal(u64),

    /// A vertex lies in a component with no terminal and cannot be mapped
    #[error("Vertex {0} is unreachable from every terminal")]
    TerminalUnreachable(u64),

    /// Terminal count exceeds the configured bound for exponential enumeration
    #[error("Terminal count {count} exceeds configured maximum {limit} (cost is 2^(k-1) min cuts)")]
    TooManyTerminals {
        /// Number of terminals supplied
        count: usize,
        /// Configured upper bound
        limit: usize,
    },

    /// Invalid configuration or call parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl SparsifierError {
    /// Check whether the error points at malformed caller input
    /// (as opposed to a structural property of the graph itself).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SparsifierError::InvalidCapacity { .. }
                | SparsifierError::InvalidEdge(_, _)
                | SparsifierError::EdgeExists(_, _)
                | SparsifierError::EmptyTerminalSet
                | SparsifierError::UnknownTerminal(_)
                | SparsifierError::InvalidParameter(_)
        )
    }
}
