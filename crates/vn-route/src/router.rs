//! Coordinate-to-coordinate routing.
//!
//! # Pluggability
//!
//! [`route_with`] reaches the graph only through the [`PathFinder`] trait,
//! so callers can wrap the default [`GraphPathFinder`] (instrumentation,
//! memoisation, an external search engine) without touching the snapping
//! and candidate-selection logic.  [`route`] uses the default.
//!
//! # Algorithm
//!
//! ```text
//! ① snap `from` toward the network, `to` away from it
//! ② both on one line, either strictly inside it → direct partial-line
//!    path along that line if its direction is open (no graph search)
//! ③ otherwise: find_distance for every (from, to) candidate pair,
//!    total = from partial + network + to partial, first strict minimum wins
//! ④ find_path for the winning pair, assemble geometry
//! ```

use std::iter::once;

use geo::{Coord, LineString};
use log::debug;

use vn_core::geom::{concat, prune};
use vn_core::{Arc, Cost, Direction, NodeId};
use vn_graph::{PathReport, PathStep, SearchCache};

use crate::network::{Endpoint, Network};
use crate::snap::{Snap, SnapCandidate, SnapDirection, snap};
use crate::{Route, RouteConfig, RouteError, RouteResult};

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Junction-to-junction search used by [`route_with`].
///
/// Takes `&mut self` so implementations can keep per-query state such as a
/// [`SearchCache`].
pub trait PathFinder {
    /// Lowest cost from junction `from` to junction `to`.
    fn find_distance(&mut self, network: &Network, from: NodeId, to: NodeId) -> RouteResult<f64>;

    /// Lowest-cost path from junction `from` to junction `to`.
    fn find_path(&mut self, network: &Network, from: NodeId, to: NodeId) -> RouteResult<PathReport>;
}

// ── GraphPathFinder ───────────────────────────────────────────────────────────

/// Searches the network's own cost graph, optionally through a cache.
#[derive(Debug, Default)]
pub struct GraphPathFinder {
    cache: Option<SearchCache>,
}

impl GraphPathFinder {
    pub fn new(use_cache: bool) -> Self {
        Self { cache: use_cache.then(SearchCache::new) }
    }

    pub fn cache(&self) -> Option<&SearchCache> {
        self.cache.as_ref()
    }
}

impl PathFinder for GraphPathFinder {
    fn find_distance(&mut self, network: &Network, from: NodeId, to: NodeId) -> RouteResult<f64> {
        network.find_distance(Endpoint::Junction(from), Endpoint::Junction(to), self.cache.as_mut())
    }

    fn find_path(&mut self, network: &Network, from: NodeId, to: NodeId) -> RouteResult<PathReport> {
        network.find_path(Endpoint::Junction(from), Endpoint::Junction(to), self.cache.as_mut())
    }
}

// ── route ─────────────────────────────────────────────────────────────────────

/// Lowest-cost route between two arbitrary coordinates.
///
/// # Errors
///
/// - [`RouteError::NotFound`] if either coordinate has no line within its
///   search radius.
/// - [`RouteError::Unreachable`] if no candidate pair is connected.
/// - [`RouteError::MalformedGraph`] and [`RouteError::InvalidEncoding`] are
///   propagated from the search and abort the query.
pub fn route(network: &Network, from: Coord<f64>, to: Coord<f64>, config: &RouteConfig) -> RouteResult<Route> {
    let mut finder = GraphPathFinder::new(config.use_cache);
    route_with(network, from, to, config, &mut finder)
}

/// [`route`] with a caller-supplied [`PathFinder`].
pub fn route_with<F: PathFinder + ?Sized>(
    network: &Network,
    from: Coord<f64>,
    to: Coord<f64>,
    config: &RouteConfig,
    finder: &mut F,
) -> RouteResult<Route> {
    let from_snap = snap(network, from, SnapDirection::TowardNetwork, config.max_from_distance)?;
    let to_snap = snap(network, to, SnapDirection::AwayFromNetwork, config.max_to_distance)?;

    if from_snap.feature == to_snap.feature && (from_snap.is_interior() || to_snap.is_interior()) {
        match shortcut(network, &from_snap, &to_snap, config)? {
            Some(route) => return Ok(route),
            None => debug!("route: shortcut along {} is closed, searching", from_snap.feature),
        }
    }

    // Every (from, to) candidate pair; first strict minimum wins.
    let mut best: Option<(&SnapCandidate, &SnapCandidate, f64)> = None;
    for fc in &from_snap.candidates {
        for tc in &to_snap.candidates {
            let network_cost = match finder.find_distance(network, fc.node, tc.node) {
                Ok(d) => d,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    debug!("route: {} -> {} skipped: {e}", fc.node, tc.node);
                    continue;
                }
            };
            let total = fc.cost + network_cost + tc.cost;
            if best.is_none_or(|(_, _, b)| total < b) {
                best = Some((fc, tc, total));
            }
        }
    }
    let Some((fc, tc, _)) = best else {
        return Err(RouteError::Unreachable(format!(
            "no candidate pair connects ({}, {}) to ({}, {})",
            from.x, from.y, to.x, to.y
        )));
    };
    debug!("route: selected {} -> {}", fc.node, tc.node);

    let report = finder.find_path(network, fc.node, tc.node)?;
    assemble(network, &from_snap, fc, &to_snap, tc, report, config)
}

// ── Shortcut ──────────────────────────────────────────────────────────────────

/// Direct path along the single line both coordinates snapped to, `None`
/// when that direction is closed.
fn shortcut(network: &Network, from: &Snap, to: &Snap, config: &RouteConfig) -> RouteResult<Option<Route>> {
    let line = network.require_feature(from.feature)?;
    let pts = &line.geometry.0;
    let (f, t) = (from.projection.along, to.projection.along);
    let (fseg, tseg) = (from.projection.segment, to.projection.segment);

    let mut coords = vec![from.coord, from.projection.point];
    let (steps, cost) = if f == t {
        (Vec::new(), 0.0)
    } else {
        let direction = if t > f { Direction::Forward } else { Direction::Backward };
        let Cost::Open(c) = line.cost(direction) else {
            return Ok(None);
        };
        let cost = if line.length > 0.0 { c * (t - f).abs() / line.length } else { 0.0 };
        match direction {
            Direction::Forward  => coords.extend_from_slice(&pts[fseg + 1..=tseg]),
            Direction::Backward => coords.extend(pts[tseg + 1..=fseg].iter().rev()),
        }
        coords.push(to.projection.point);
        let step = PathStep { arc: Arc::new(line.id, direction), cost, distance: cost };
        (vec![step], cost)
    };
    coords.push(to.coord);
    prune(&mut coords);

    debug!("route: shortcut along {}, cost {cost}", line.id);

    // Only ends that sit exactly on a junction touch one.
    let junctions = if config.collect_nodes {
        from.junction.into_iter().chain(to.junction).collect()
    } else {
        Vec::new()
    };

    Ok(Some(Route {
        cost,
        from_cost: 0.0,
        network_cost: cost,
        to_cost: 0.0,
        steps,
        geometry: LineString::new(coords),
        from_geometry: LineString::new(vec![from.coord, from.projection.point]),
        to_geometry: LineString::new(vec![to.projection.point, to.coord]),
        from_distance: from.distance(),
        to_distance: to.distance(),
        junctions,
        shortcut: true,
    }))
}

// ── Assembly ──────────────────────────────────────────────────────────────────

fn assemble(
    network: &Network,
    from: &Snap,
    fc: &SnapCandidate,
    to: &Snap,
    tc: &SnapCandidate,
    report: PathReport,
    config: &RouteConfig,
) -> RouteResult<Route> {
    let lines = report
        .steps
        .iter()
        .map(|step| Ok((network.require_feature(step.arc.feature)?, step.arc.direction)))
        .collect::<RouteResult<Vec<_>>>()?;

    let geometry = concat(
        once((&fc.geometry, Direction::Forward))
            .chain(lines.iter().map(|(line, direction)| (&line.geometry, *direction)))
            .chain(once((&tc.geometry, Direction::Forward))),
    );

    let mut junctions = Vec::new();
    if config.collect_nodes {
        // A coordinate lying on a junction other than the search end still
        // reports that junction.
        if let Some(node) = from.junction.filter(|&n| n != fc.node) {
            junctions.push(node);
        }
        junctions.push(fc.node);
        junctions.extend(lines.iter().map(|(line, direction)| line.head(*direction)));
        if junctions.last() != Some(&tc.node) {
            junctions.push(tc.node);
        }
        if let Some(node) = to.junction.filter(|&n| n != tc.node) {
            junctions.push(node);
        }
    }

    Ok(Route {
        cost: fc.cost + report.cost + tc.cost,
        from_cost: fc.cost,
        network_cost: report.cost,
        to_cost: tc.cost,
        steps: report.steps,
        geometry,
        from_geometry: fc.geometry.clone(),
        to_geometry: tc.geometry.clone(),
        from_distance: from.distance(),
        to_distance: to.distance(),
        junctions,
        shortcut: false,
    })
}
