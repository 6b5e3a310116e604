//! Graph-subsystem error type.

use thiserror::Error;

use vn_core::NodeId;

/// Errors produced by `vn-graph`.
///
/// Only [`GraphError::Unreachable`] is an ordinary outcome.  The other two
/// variants mean the caller handed in a graph or id that violates the
/// subsystem's preconditions; queries abort on them instead of trying the
/// next candidate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("node {to} is unreachable from node {from}")]
    Unreachable { from: NodeId, to: NodeId },

    #[error("malformed graph: {0}")]
    MalformedGraph(String),

    #[error("feature id {0} is outside the virtual-node encoding range")]
    InvalidEncoding(i64),
}

impl GraphError {
    /// `true` for errors that must abort the calling query.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, GraphError::Unreachable { .. })
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
