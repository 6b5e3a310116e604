//! Nearest-network-point resolution.
//!
//! [`snap`] attaches an arbitrary coordinate to the nearest network line and
//! lists the junction(s) a route can use to get onto (or off) the network
//! there, each with the cost and geometry of the partial line in between.
//!
//! ```text
//!             coord
//!               │ distance
//!   start ●─────┼───────────────● end
//!         ◀along▶◀─length-along─▶
//! ```
//!
//! Partial costs interpolate linearly: `cost * along / length` towards the
//! start junction, `cost * (length - along) / length` towards the end.

use geo::{Coord, LineString};
use log::debug;

use vn_core::geom::{LineProjection, project};
use vn_core::{Cost, FeatureId, NodeId};

use crate::network::{Feature, Network};
use crate::{RouteError, RouteResult};

/// Which way a snapped coordinate is travelling relative to the network.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapDirection {
    /// Route start: travel from the coordinate onto the network.
    #[default]
    TowardNetwork,
    /// Route end: travel off the network to the coordinate.
    AwayFromNetwork,
}

/// One way onto (or off) the network from a snapped coordinate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapCandidate {
    pub node:     NodeId,
    /// Partial line cost between the projection point and `node`.
    pub cost:     f64,
    /// Coordinate → projection → vertices → `node` when travelling toward
    /// the network; the reverse when travelling away.
    pub geometry: LineString<f64>,
}

/// Result of [`snap`].
#[derive(Clone, Debug, PartialEq)]
pub struct Snap {
    pub feature:    FeatureId,
    pub coord:      Coord<f64>,
    pub projection: LineProjection,
    /// Length of the snapped line.
    pub length:     f64,
    /// Junction the projection lands on exactly, `None` for an interior
    /// projection.
    pub junction:   Option<NodeId>,
    /// Start junction first when both are usable.
    pub candidates: Vec<SnapCandidate>,
}

impl Snap {
    /// Perpendicular distance from the coordinate to the network.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.projection.distance
    }

    /// `true` when the projection falls strictly inside the line.
    #[inline]
    pub fn is_interior(&self) -> bool {
        self.junction.is_none()
    }
}

/// Snap `coord` onto the nearest line within `max_distance`.
///
/// # Errors
///
/// - [`RouteError::NotFound`] when no line is within `max_distance`.
/// - [`RouteError::Unreachable`] when the line is closed in both directions
///   that could be used.
pub fn snap(
    network: &Network,
    coord: Coord<f64>,
    direction: SnapDirection,
    max_distance: f64,
) -> RouteResult<Snap> {
    let (feature, _) = network.nearest_feature(coord, max_distance).ok_or(RouteError::NotFound {
        x: coord.x,
        y: coord.y,
        max_distance,
    })?;
    let projection = project(&feature.geometry, coord)?;
    let pts = &feature.geometry.0;

    let junction = if projection.point == pts[0] {
        Some(feature.start)
    } else if Some(&projection.point) == pts.last() {
        Some(feature.end)
    } else {
        None
    };

    let candidates = match junction {
        Some(node) => vec![SnapCandidate {
            node,
            cost: 0.0,
            geometry: match direction {
                SnapDirection::TowardNetwork   => LineString::new(vec![coord, projection.point]),
                SnapDirection::AwayFromNetwork => LineString::new(vec![projection.point, coord]),
            },
        }],
        None => interior_candidates(feature, coord, &projection, direction)?,
    };

    debug!(
        "snap ({}, {}) {:?}: {} at distance {}, {} candidate(s)",
        coord.x,
        coord.y,
        direction,
        feature.id,
        projection.distance,
        candidates.len()
    );

    Ok(Snap { feature: feature.id, coord, projection, length: feature.length, junction, candidates })
}

fn interior_candidates(
    feature: &Feature,
    coord: Coord<f64>,
    projection: &LineProjection,
    direction: SnapDirection,
) -> RouteResult<Vec<SnapCandidate>> {
    // Cost of the partial line between the projection and each end.
    let (to_start, to_end) = match direction {
        SnapDirection::TowardNetwork   => (feature.backward, feature.forward),
        SnapDirection::AwayFromNetwork => (feature.forward, feature.backward),
    };
    if to_start.is_closed() && to_end.is_closed() {
        return Err(RouteError::Unreachable(format!(
            "{} is closed in both directions at ({}, {})",
            feature.id, coord.x, coord.y
        )));
    }

    let pts = &feature.geometry.0;
    let seg = projection.segment;
    let fraction = |part: f64| if feature.length > 0.0 { part / feature.length } else { 0.0 };

    let mut candidates = Vec::with_capacity(2);
    if let Cost::Open(c) = to_start {
        let vertices = pts[..=seg].iter().rev().copied();
        candidates.push(SnapCandidate {
            node: feature.start,
            cost: c * fraction(projection.along),
            geometry: partial(coord, projection.point, vertices, direction),
        });
    }
    if let Cost::Open(c) = to_end {
        let vertices = pts[seg + 1..].iter().copied();
        candidates.push(SnapCandidate {
            node: feature.end,
            cost: c * fraction(feature.length - projection.along),
            geometry: partial(coord, projection.point, vertices, direction),
        });
    }
    Ok(candidates)
}

/// `coord → point → vertices` toward the network, reversed away from it.
/// `vertices` run outward from the projection point to the junction.
fn partial(
    coord: Coord<f64>,
    point: Coord<f64>,
    vertices: impl Iterator<Item = Coord<f64>>,
    direction: SnapDirection,
) -> LineString<f64> {
    let mut coords = vec![coord, point];
    coords.extend(vertices);
    if direction == SnapDirection::AwayFromNetwork {
        coords.reverse();
    }
    LineString::new(coords)
}
