//! Routing error type.

use thiserror::Error;

use vn_core::CoreError;
use vn_graph::GraphError;

use crate::network::Endpoint;

/// Errors produced by `vn-route`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    /// No network line lies within the search radius of a coordinate.
    #[error("no network line within {max_distance} of ({x}, {y})")]
    NotFound { x: f64, y: f64, max_distance: f64 },

    /// No open path exists, or every way onto or off the network is closed.
    #[error("unreachable: {0}")]
    Unreachable(String),

    /// Inconsistent network input or search failure.  Aborts the query.
    #[error("malformed graph: {0}")]
    MalformedGraph(String),

    #[error("feature id {0} is outside the virtual-node encoding range")]
    InvalidEncoding(i64),

    #[error("endpoint {0:?} cannot be used with this network")]
    UnsupportedEndpoint(Endpoint),

    #[error("geometry error: {0}")]
    Core(#[from] CoreError),
}

impl RouteError {
    /// `true` unless the error only means "no path"; fatal errors abort a
    /// multi-candidate search instead of skipping the candidate.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, RouteError::Unreachable(_) | RouteError::NotFound { .. })
    }
}

impl From<GraphError> for RouteError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Unreachable { from, to } => {
                RouteError::Unreachable(format!("{to} is unreachable from {from}"))
            }
            GraphError::MalformedGraph(msg) => RouteError::MalformedGraph(msg),
            GraphError::InvalidEncoding(id) => RouteError::InvalidEncoding(id),
        }
    }
}

pub type RouteResult<T> = Result<T, RouteError>;
