//! Result of a coordinate-to-coordinate route.

use geo::LineString;

use vn_core::{Arc, NodeId};
use vn_graph::PathStep;

/// Lowest-cost route between two coordinates.
///
/// `cost = from_cost + network_cost + to_cost`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub cost:          f64,
    /// Partial line cost from the start coordinate's projection to the first
    /// junction.
    pub from_cost:     f64,
    /// Cost of the junction-to-junction path (the partial line for a
    /// shortcut).
    pub network_cost:  f64,
    pub to_cost:       f64,

    /// Arcs traversed between the two snapped junctions.  A shortcut reports
    /// the one partially traversed line here, or nothing when both
    /// coordinates project onto the same point.
    pub steps:         Vec<PathStep>,

    /// Whole route: start coordinate → network → end coordinate, without
    /// consecutive duplicate vertices.
    pub geometry:      LineString<f64>,
    pub from_geometry: LineString<f64>,
    pub to_geometry:   LineString<f64>,

    /// Perpendicular distance from the start coordinate to the network.
    pub from_distance: f64,
    pub to_distance:   f64,

    /// Junctions passed in order; empty unless
    /// [`RouteConfig::collect_nodes`](crate::RouteConfig::collect_nodes).
    /// A shortcut lists only the ends that lie exactly on a junction.
    pub junctions:     Vec<NodeId>,

    /// `true` when both coordinates share a line and no graph search ran.
    pub shortcut:      bool,
}

impl Route {
    pub fn arcs(&self) -> impl Iterator<Item = Arc> + '_ {
        self.steps.iter().map(|s| s.arc)
    }

    /// Signed line ids, negative for backward traversal.
    pub fn signed_features(&self) -> Vec<i64> {
        self.arcs().map(Arc::signed).collect()
    }
}
