//! [`NetworkBuilder`]: assemble a [`Network`] from caller-supplied topology.
//!
//! The caller already knows each line's end junctions; nothing here derives
//! topology from geometry.
//!
//! # Turn tables
//!
//! In turn-table mode the cost graph is laid out over virtual nodes:
//!
//! ```text
//!   (f, Forward)  node 2f      cost = forward line cost
//!   (f, Backward) node 2f + 1  cost = backward line cost
//!
//!   isec source 2i  ──0──▶ every arc leaving junction j
//!   every arc arriving at j ──0──▶ isec sink 2i + 1
//!   arc a ──(turn cost + junction cost)──▶ arc b   for each open turn a → b at j
//! ```
//!
//! where `i` is the intersection id of junction `j`.  Line costs sit on the
//! arc nodes, so the clipper charges them when a path *leaves* a line.
//! Turns that are not listed do not exist.

use geo::LineString;
use log::{debug, info, warn};
use rstar::RTree;
use rustc_hash::{FxHashMap, FxHashSet};

use vn_core::geom::line_length;
use vn_core::{Arc, CoreError, Cost, Direction, FeatureId, NodeId};
use vn_graph::{CostGraph, CostGraphBuilder, vnode};

use crate::network::{Feature, Network, SegmentEntry};
use crate::{RouteError, RouteResult};

struct Turn {
    from: Arc,
    to:   Arc,
    cost: Cost,
}

/// Construct a [`Network`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use geo::line_string;
/// use vn_core::{Cost, FeatureId, NodeId};
/// use vn_route::NetworkBuilder;
///
/// let mut b = NetworkBuilder::new();
/// b.add_line(
///     FeatureId(1), NodeId(1), NodeId(2),
///     line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)],
///     Cost::Open(10.0), Cost::Open(10.0),
/// );
/// let net = b.build().unwrap();
/// assert_eq!(net.feature_count(), 1);
/// assert_eq!(net.junction_count(), 2);
/// ```
#[derive(Default)]
pub struct NetworkBuilder {
    turn_table:     bool,
    junction_costs: FxHashMap<NodeId, Cost>,
    lines:          Vec<Feature>,
    intersections:  FxHashMap<NodeId, FeatureId>,
    turns:          Vec<Turn>,
}

impl NetworkBuilder {
    /// Builder for a plain network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder for a turn-table network.
    pub fn turn_table() -> Self {
        Self { turn_table: true, ..Self::default() }
    }

    pub fn is_turn_table(&self) -> bool {
        self.turn_table
    }

    /// Set the cost of passing through `node`.  Junctions default to zero.
    pub fn add_junction(&mut self, node: NodeId, cost: Cost) -> &mut Self {
        self.junction_costs.insert(node, cost);
        self
    }

    /// Add a line running from junction `start` (first vertex) to junction
    /// `end` (last vertex).
    pub fn add_line(
        &mut self,
        id: FeatureId,
        start: NodeId,
        end: NodeId,
        geometry: LineString<f64>,
        forward: Cost,
        backward: Cost,
    ) -> &mut Self {
        let length = line_length(&geometry);
        self.lines.push(Feature { id, start, end, geometry, length, forward, backward });
        self
    }

    /// Assign intersection id `isec` to `junction`.  Turn-table mode only;
    /// intersection ids share the id space of line features.
    pub fn add_intersection(&mut self, junction: NodeId, isec: FeatureId) -> &mut Self {
        if !self.turn_table {
            warn!("add_intersection({junction}, {isec}) ignored on a plain network");
            return self;
        }
        self.intersections.insert(junction, isec);
        self
    }

    /// Allow turning from arc `from` into arc `to` at the junction where
    /// `from` arrives.  Turn-table mode only.  A closed turn is recorded but
    /// adds no edge.
    pub fn add_turn(&mut self, from: Arc, to: Arc, cost: Cost) -> &mut Self {
        if !self.turn_table {
            warn!("add_turn({from} -> {to}) ignored on a plain network");
            return self;
        }
        self.turns.push(Turn { from, to, cost });
        self
    }

    pub fn line_count(&self) -> usize { self.lines.len() }
    pub fn turn_count(&self) -> usize { self.turns.len() }

    /// Consume the builder and produce a [`Network`].
    ///
    /// # Errors
    ///
    /// - [`RouteError::Core`] for lines with fewer than two vertices.
    /// - [`RouteError::MalformedGraph`] for non-positive or duplicate line
    ///   ids, invalid costs, or intersection ids colliding with line ids.
    /// - [`RouteError::InvalidEncoding`] for ids outside the virtual-node
    ///   range (turn-table mode).
    pub fn build(self) -> RouteResult<Network> {
        let mut features: FxHashMap<FeatureId, Feature> = FxHashMap::default();
        let mut junction_costs = self.junction_costs;
        let mut segments = Vec::new();

        for line in self.lines {
            // Signed arcs fold direction into the sign.
            if line.id.0 <= 0 {
                return Err(RouteError::MalformedGraph(format!(
                    "line id {} must be positive",
                    line.id.0
                )));
            }
            if line.geometry.0.len() < 2 {
                return Err(CoreError::DegenerateLine(line.geometry.0.len()).into());
            }
            for cost in [line.forward, line.backward] {
                if !cost.is_valid() {
                    return Err(RouteError::MalformedGraph(format!(
                        "line {} has invalid cost {cost}",
                        line.id
                    )));
                }
            }
            junction_costs.entry(line.start).or_insert(Cost::ZERO);
            junction_costs.entry(line.end).or_insert(Cost::ZERO);
            segments.extend(line.geometry.lines().map(|seg| SegmentEntry {
                start:   [seg.start.x, seg.start.y],
                end:     [seg.end.x, seg.end.y],
                feature: line.id,
            }));
            let id = line.id;
            if features.insert(id, line).is_some() {
                return Err(RouteError::MalformedGraph(format!("duplicate line id {id}")));
            }
        }

        let graph = if self.turn_table {
            turn_table_graph(&features, &junction_costs, &self.intersections, &self.turns)?
        } else {
            plain_graph(&features, &junction_costs)?
        };

        info!(
            "network built: {} lines, {} junctions, {} graph nodes, {} graph edges{}",
            features.len(),
            junction_costs.len(),
            graph.node_count(),
            graph.edge_count(),
            if self.turn_table { " (turn table)" } else { "" },
        );

        Ok(Network {
            graph,
            features,
            junction_costs,
            intersections: self.intersections,
            segments: RTree::bulk_load(segments),
        })
    }
}

/// Sorted view of the lines so graph layout does not depend on hash order.
fn sorted(features: &FxHashMap<FeatureId, Feature>) -> Vec<&Feature> {
    let mut lines: Vec<&Feature> = features.values().collect();
    lines.sort_by_key(|f| f.id);
    lines
}

fn plain_graph(
    features: &FxHashMap<FeatureId, Feature>,
    junction_costs: &FxHashMap<NodeId, Cost>,
) -> RouteResult<CostGraph> {
    let mut b = CostGraphBuilder::new().with_capacity(junction_costs.len(), features.len() * 2);
    let mut junctions: Vec<(NodeId, Cost)> = junction_costs.iter().map(|(&n, &c)| (n, c)).collect();
    junctions.sort_by_key(|(n, _)| *n);
    for (node, cost) in junctions {
        b.add_node(node, cost);
    }
    for line in sorted(features) {
        let arc = Arc::forward(line.id);
        b.add_arc(line.start, line.end, arc.signed(), line.forward);
        b.add_arc(line.end, line.start, arc.reverse().signed(), line.backward);
    }
    Ok(b.build()?)
}

fn turn_table_graph(
    features: &FxHashMap<FeatureId, Feature>,
    junction_costs: &FxHashMap<NodeId, Cost>,
    intersections: &FxHashMap<NodeId, FeatureId>,
    turns: &[Turn],
) -> RouteResult<CostGraph> {
    let lines = sorted(features);
    let isec_ids: FxHashSet<FeatureId> = intersections.values().copied().collect();
    if let Some(clash) = isec_ids.iter().find(|id| features.contains_key(id)) {
        return Err(RouteError::MalformedGraph(format!(
            "intersection id {clash} is also a line id"
        )));
    }

    let mut b = CostGraphBuilder::turn_table(features.keys().copied())
        .with_capacity(lines.len() * 2 + isec_ids.len() * 2, lines.len() * 4 + turns.len());

    // Arc states carry the line costs.
    for line in &lines {
        for direction in [Direction::Forward, Direction::Backward] {
            let arc = Arc::new(line.id, direction);
            b.add_node(vnode::encode(arc)?, line.cost(direction));
        }
    }

    // Intersection connectors.
    let mut leaving:  FxHashMap<NodeId, Vec<Arc>> = FxHashMap::default();
    let mut arriving: FxHashMap<NodeId, Vec<Arc>> = FxHashMap::default();
    for line in &lines {
        for direction in [Direction::Forward, Direction::Backward] {
            let arc = Arc::new(line.id, direction);
            leaving.entry(line.tail(direction)).or_default().push(arc);
            arriving.entry(line.head(direction)).or_default().push(arc);
        }
    }
    let mut junctions: Vec<(NodeId, FeatureId)> =
        intersections.iter().map(|(&j, &i)| (j, i)).collect();
    junctions.sort();
    for (junction, isec) in junctions {
        let source = vnode::intersection_source(isec)?;
        let sink = vnode::intersection_sink(isec)?;
        b.add_node(source, Cost::ZERO);
        b.add_node(sink, Cost::ZERO);
        for &arc in leaving.get(&junction).into_iter().flatten() {
            b.add_arc(source, vnode::encode(arc)?, isec.0, Cost::ZERO);
        }
        for &arc in arriving.get(&junction).into_iter().flatten() {
            b.add_arc(vnode::encode(arc)?, sink, isec.0, Cost::ZERO);
        }
    }
    for junction in junction_costs.keys() {
        if !intersections.contains_key(junction) {
            debug!("turn table: junction {junction} has no intersection and cannot be a route end");
        }
    }

    // Turns.
    let mut skipped = 0usize;
    for (i, turn) in turns.iter().enumerate() {
        let (Some(from), Some(to)) = (features.get(&turn.from.feature), features.get(&turn.to.feature))
        else {
            warn!("turn {} -> {} references an unknown line, skipped", turn.from, turn.to);
            continue;
        };
        let junction = from.head(turn.from.direction);
        if to.tail(turn.to.direction) != junction {
            warn!(
                "turn {} -> {} does not meet at one junction ({junction} vs {}), skipped",
                turn.from,
                turn.to,
                to.tail(turn.to.direction)
            );
            continue;
        }
        if !turn.cost.is_valid() {
            return Err(RouteError::MalformedGraph(format!(
                "turn {} -> {} has invalid cost {}",
                turn.from, turn.to, turn.cost
            )));
        }
        let node_cost = junction_costs.get(&junction).copied().unwrap_or(Cost::ZERO);
        match (turn.cost.value(), node_cost.value()) {
            (Some(t), Some(n)) => b.add_arc(
                vnode::encode(turn.from)?,
                vnode::encode(turn.to)?,
                i as i64,
                Cost::Open(t + n),
            ),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!("turn table: {skipped} closed turns add no edge");
    }

    Ok(b.build()?)
}
