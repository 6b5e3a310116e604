//! Node-to-node shortest path and distance queries.
//!
//! Both queries charge node costs through [`NodeCostClipper`] anchored at
//! the query origin, and accept an optional [`SearchCache`].

use log::debug;

use vn_core::{Arc, NodeId};

use crate::clip::NodeCostClipper;
use crate::graph::{CostGraph, GraphMode, NodeIx};
use crate::report::{PathReport, PathStep};
use crate::search::{self, RawPath, SearchCache};
use crate::{vnode, GraphError, GraphResult};

fn resolve(graph: &CostGraph, id: NodeId) -> GraphResult<NodeIx> {
    graph
        .node_ix(id)
        .ok_or_else(|| GraphError::MalformedGraph(format!("{id} is not in the graph")))
}

/// Lowest-cost path from `from` to `to`.
///
/// `from == to` yields an empty zero-cost report without searching.
///
/// # Errors
///
/// - [`GraphError::Unreachable`] when no open path exists.
/// - [`GraphError::MalformedGraph`] for node ids missing from the graph.
/// - [`GraphError::InvalidEncoding`] if a turn-table path visits a node that
///   is not a valid virtual node.
pub fn find_path(
    graph: &CostGraph,
    from: NodeId,
    to: NodeId,
    cache: Option<&mut SearchCache>,
) -> GraphResult<PathReport> {
    if from == to {
        return Ok(PathReport::empty());
    }
    let (from_ix, to_ix) = (resolve(graph, from)?, resolve(graph, to)?);
    let clip = NodeCostClipper::new(from_ix);

    match search::shortest_path(graph, from_ix, to_ix, &clip, cache)? {
        Some(raw) => {
            let report = to_report(graph, raw)?;
            debug!("find_path {from} -> {to}: cost {}, {} arcs", report.cost, report.len());
            Ok(report)
        }
        None => {
            debug!("find_path {from} -> {to}: unreachable");
            Err(GraphError::Unreachable { from, to })
        }
    }
}

/// Lowest cost from `from` to `to`.
///
/// # Errors
///
/// As [`find_path`], apart from encoding errors which cannot occur.
pub fn find_distance(
    graph: &CostGraph,
    from: NodeId,
    to: NodeId,
    cache: Option<&mut SearchCache>,
) -> GraphResult<f64> {
    if from == to {
        return Ok(0.0);
    }
    let (from_ix, to_ix) = (resolve(graph, from)?, resolve(graph, to)?);
    let clip = NodeCostClipper::new(from_ix);

    search::shortest_distance(graph, from_ix, to_ix, &clip, cache)?
        .ok_or(GraphError::Unreachable { from, to })
}

/// Decode the edges of `raw` into arcs.
///
/// Plain graphs carry the signed feature id as edge label.  Turn-table
/// graphs encode the arc in the node an edge enters; arcs of features
/// outside the registry are auxiliary and dropped.
fn to_report(graph: &CostGraph, raw: RawPath) -> GraphResult<PathReport> {
    let mut steps = Vec::with_capacity(raw.steps.len());
    for step in raw.steps {
        let arc = match graph.mode() {
            GraphMode::Plain => Arc::from_signed(graph.edge_label(step.edge)),
            GraphMode::TurnTable { real_features } => {
                let arc = vnode::decode(graph.node_id(step.to))?;
                if !real_features.contains(&arc.feature) {
                    continue;
                }
                arc
            }
        };
        steps.push(PathStep { arc, cost: step.cost, distance: step.distance });
    }
    Ok(PathReport { steps, cost: raw.cost })
}
