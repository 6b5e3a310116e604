//! Network handle: cost graph, line geometry, and a segment R-tree.
//!
//! # Plain and turn-table networks
//!
//! A plain network searches over topological junctions; each line adds one
//! edge per direction.  A turn-table network searches over virtual nodes
//! (one per line direction, see [`vn_graph::vnode`]) so turn costs and
//! restrictions are ordinary edges.  Both are built by
//! [`NetworkBuilder`](crate::NetworkBuilder); queries take the same
//! junction ids either way and are translated here.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) holds every line *segment*.  The nearest segment
//! to a coordinate gives the nearest line; snapping then projects onto the
//! whole line.

use geo::{Coord, LineString};
use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use vn_core::{Arc, Cost, Direction, FeatureId, NodeId};
use vn_graph::{CostGraph, PathReport, SearchCache, vnode};

use crate::{RouteError, RouteResult};

// ── R-tree segment entry ──────────────────────────────────────────────────────

/// One straight segment of a network line.
#[derive(Clone, Debug)]
pub(crate) struct SegmentEntry {
    pub(crate) start:   [f64; 2],
    pub(crate) end:     [f64; 2],
    pub(crate) feature: FeatureId,
}

impl RTreeObject for SegmentEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.start, self.end)
    }
}

impl PointDistance for SegmentEntry {
    /// Squared Euclidean distance from `point` to the closest point of the
    /// segment.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let (dx, dy) = (self.end[0] - self.start[0], self.end[1] - self.start[1]);
        let len_2 = dx * dx + dy * dy;
        let t = if len_2 == 0.0 {
            0.0
        } else {
            (((point[0] - self.start[0]) * dx + (point[1] - self.start[1]) * dy) / len_2)
                .clamp(0.0, 1.0)
        };
        let (px, py) = (self.start[0] + dx * t, self.start[1] + dy * t);
        (point[0] - px).powi(2) + (point[1] - py).powi(2)
    }
}

// ── Feature ───────────────────────────────────────────────────────────────────

/// One network line with its end junctions and directional costs.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub id:       FeatureId,
    /// Junction at the first vertex.
    pub start:    NodeId,
    /// Junction at the last vertex.
    pub end:      NodeId,
    pub geometry: LineString<f64>,
    pub length:   f64,
    /// Cost of traversing start → end.
    pub forward:  Cost,
    /// Cost of traversing end → start.
    pub backward: Cost,
}

impl Feature {
    #[inline]
    pub fn cost(&self, direction: Direction) -> Cost {
        match direction {
            Direction::Forward  => self.forward,
            Direction::Backward => self.backward,
        }
    }

    /// Junction an arc over this line leaves from.
    #[inline]
    pub fn tail(&self, direction: Direction) -> NodeId {
        match direction {
            Direction::Forward  => self.start,
            Direction::Backward => self.end,
        }
    }

    /// Junction an arc over this line arrives at.
    #[inline]
    pub fn head(&self, direction: Direction) -> NodeId {
        self.tail(direction.reverse())
    }
}

// ── Endpoint ──────────────────────────────────────────────────────────────────

/// Start or end of a node-level query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endpoint {
    /// A topological junction.  In turn-table networks this is the
    /// junction's intersection.
    Junction(NodeId),
    /// Being on a line in a given direction.  Turn-table networks only.
    Arc(Arc),
}

// ── Network ───────────────────────────────────────────────────────────────────

/// Immutable routing network.  Share it by reference; every query only
/// reads it.  Do not construct directly; use
/// [`NetworkBuilder`](crate::NetworkBuilder).
#[derive(Debug)]
pub struct Network {
    pub(crate) graph:          CostGraph,
    pub(crate) features:       FxHashMap<FeatureId, Feature>,
    pub(crate) junction_costs: FxHashMap<NodeId, Cost>,
    /// Turn-table networks only: junction → intersection id.
    pub(crate) intersections:  FxHashMap<NodeId, FeatureId>,
    pub(crate) segments:       RTree<SegmentEntry>,
}

impl Network {
    pub fn graph(&self) -> &CostGraph {
        &self.graph
    }

    #[inline]
    pub fn is_turn_table(&self) -> bool {
        self.graph.is_turn_table()
    }

    // ── Features and costs ────────────────────────────────────────────────

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn junction_count(&self) -> usize {
        self.junction_costs.len()
    }

    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.features.get(&id)
    }

    pub(crate) fn require_feature(&self, id: FeatureId) -> RouteResult<&Feature> {
        self.feature(id)
            .ok_or_else(|| RouteError::MalformedGraph(format!("{id} is not a network line")))
    }

    pub fn features(&self) -> impl Iterator<Item = &Feature> + '_ {
        self.features.values()
    }

    /// Cost of traversing `feature` in `direction`; `None` for unknown lines.
    pub fn arc_cost(&self, feature: FeatureId, direction: Direction) -> Option<Cost> {
        self.feature(feature).map(|f| f.cost(direction))
    }

    /// Cost of passing through junction `node`; `None` for unknown junctions.
    pub fn node_cost(&self, node: NodeId) -> Option<Cost> {
        self.junction_costs.get(&node).copied()
    }

    /// Intersection id assigned to `junction` (turn-table networks).
    pub fn intersection(&self, junction: NodeId) -> Option<FeatureId> {
        self.intersections.get(&junction).copied()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest line to `coord` within `max_distance` and its distance.
    ///
    /// `max_distance = f64::INFINITY` searches the whole network.
    pub fn nearest_feature(&self, coord: Coord<f64>, max_distance: f64) -> Option<(&Feature, f64)> {
        let (entry, d2) = self
            .segments
            .nearest_neighbor_iter_with_distance_2(&[coord.x, coord.y])
            .next()?;
        let distance = d2.sqrt();
        if distance > max_distance {
            return None;
        }
        self.feature(entry.feature).map(|f| (f, distance))
    }

    // ── Graph queries ─────────────────────────────────────────────────────

    /// Graph node a search starts (`origin = true`) or ends at for `endpoint`.
    fn search_node(&self, endpoint: Endpoint, origin: bool) -> RouteResult<NodeId> {
        match (endpoint, self.is_turn_table()) {
            (Endpoint::Junction(node), false) => Ok(node),
            (Endpoint::Arc(_), false) => Err(RouteError::UnsupportedEndpoint(endpoint)),
            (Endpoint::Arc(arc), true) => Ok(vnode::encode(arc)?),
            (Endpoint::Junction(node), true) => {
                let isec = self.intersection(node).ok_or_else(|| {
                    RouteError::MalformedGraph(format!("junction {node} has no intersection"))
                })?;
                Ok(if origin {
                    vnode::intersection_source(isec)?
                } else {
                    vnode::intersection_sink(isec)?
                })
            }
        }
    }

    /// Lowest-cost path between two endpoints.
    ///
    /// Identical endpoints give an empty zero-cost report without searching.
    ///
    /// # Errors
    ///
    /// - [`RouteError::Unreachable`] when no open path exists.
    /// - [`RouteError::MalformedGraph`] for unknown junctions or lines.
    /// - [`RouteError::InvalidEncoding`] for arcs outside the encoder range.
    /// - [`RouteError::UnsupportedEndpoint`] for arc endpoints on a plain
    ///   network.
    pub fn find_path(
        &self,
        from: Endpoint,
        to: Endpoint,
        cache: Option<&mut SearchCache>,
    ) -> RouteResult<PathReport> {
        if from == to {
            return Ok(PathReport::empty());
        }
        let (f, t) = (self.search_node(from, true)?, self.search_node(to, false)?);
        Ok(vn_graph::find_path(&self.graph, f, t, cache)?)
    }

    /// Lowest cost between two endpoints.
    ///
    /// # Errors
    ///
    /// As [`find_path`](Self::find_path).
    pub fn find_distance(
        &self,
        from: Endpoint,
        to: Endpoint,
        cache: Option<&mut SearchCache>,
    ) -> RouteResult<f64> {
        if from == to {
            return Ok(0.0);
        }
        let (f, t) = (self.search_node(from, true)?, self.search_node(to, false)?);
        Ok(vn_graph::find_distance(&self.graph, f, t, cache)?)
    }
}
