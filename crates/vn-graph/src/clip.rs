//! Per-expansion cost clipping.
//!
//! The search primitive asks a [`Clipper`] for the effective cost of every
//! edge it is about to relax.  Returning `None` rejects the expansion.
//!
//! [`NodeCostClipper`] is the standard policy: an edge costs its own value
//! plus the cost of the node it leaves, and leaving a closed node is only
//! allowed from the search origin.

use log::trace;

use crate::graph::{CostGraph, EdgeIx, NodeIx};

/// Everything a clipper may look at for one candidate expansion.
#[derive(Copy, Clone, Debug)]
pub struct ClipInput<'a> {
    pub graph:     &'a CostGraph,
    pub edge:      EdgeIx,
    /// Node being left (edge tail).
    pub from:      NodeIx,
    /// Node being entered (edge head).
    pub to:        NodeIx,
    /// Stored cost of `edge`; closed edges never reach a clipper.
    pub edge_cost: f64,
}

/// Policy deciding the effective cost of an edge expansion.
///
/// Implementations must be pure: the search may call `clip` any number of
/// times for the same input, and cached search trees assume a clipper that
/// depends only on the input and the search origin.
pub trait Clipper {
    fn clip(&self, input: &ClipInput<'_>) -> Option<f64>;
}

impl<F> Clipper for F
where
    F: Fn(&ClipInput<'_>) -> Option<f64>,
{
    #[inline]
    fn clip(&self, input: &ClipInput<'_>) -> Option<f64> {
        self(input)
    }
}

// ── NodeCostClipper ───────────────────────────────────────────────────────────

/// Adds the tail node's cost to each edge; the origin is exempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NodeCostClipper {
    pub origin: NodeIx,
}

impl NodeCostClipper {
    pub fn new(origin: NodeIx) -> Self {
        Self { origin }
    }
}

impl Clipper for NodeCostClipper {
    fn clip(&self, input: &ClipInput<'_>) -> Option<f64> {
        if input.from == self.origin {
            return Some(input.edge_cost);
        }
        match input.graph.node_cost_at(input.from).value() {
            Some(node_cost) => Some(input.edge_cost + node_cost),
            None => {
                trace!(
                    "clip: {} closed, edge {} rejected",
                    input.graph.node_id(input.from),
                    input.graph.edge_label(input.edge)
                );
                None
            }
        }
    }
}
