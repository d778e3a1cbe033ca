//! Error types for network construction and sampling.

use thiserror::Error;

/// Errors raised while building a network or looking up weights.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A weighted-set lookup used an assignment outside its domain.
    #[error("assignment of arity {found} is outside a domain of arity {expected}")]
    ArityMismatch { expected: usize, found: usize },

    /// A name does not refer to any node in the network.
    #[error("unknown node `{0}`")]
    UnknownNode(String),

    /// Two nodes share the same name.
    #[error("duplicate node `{0}`")]
    DuplicateNode(String),

    /// A parent is listed after its child.
    #[error("node `{node}` appears before its parent `{parent}`")]
    NotTopological { node: String, parent: String },

    /// The CPT arity does not match the number of parents plus one.
    #[error("CPT of node `{node}` has arity {found}, expected {expected}")]
    CptArity { node: String, expected: usize, found: usize },

    /// A CPT entry is not a probability.
    #[error("CPT of node `{node}` has invalid probability {value} at row {row}")]
    InvalidProbability { node: String, row: String, value: f64 },

    /// The true and false rows for one parent configuration do not sum to one.
    #[error("CPT of node `{node}` is inconsistent for parents {row}: rows sum to {sum}")]
    InconsistentCpt { node: String, row: String, sum: f64 },

    /// The CPT would need more than `Assignment::MAX_ARITY` positions.
    #[error("node `{node}` has {count} parents, at most {max} are supported")]
    TooManyParents { node: String, count: usize, max: usize },

    /// The number of row probabilities does not match the number of parent configurations.
    #[error("node `{node}` needs {expected} row probabilities, got {found}")]
    RowCount { node: String, expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
