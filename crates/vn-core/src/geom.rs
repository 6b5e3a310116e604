//! Planar line geometry used by snapping and path assembly.
//!
//! Coordinates are `geo::Coord<f64>` in map units.  All distances are
//! Euclidean; projection/CRS handling belongs to the caller.
//!
//! Endpoint detection in the snapper compares coordinates with `==`, so
//! [`project`] returns the *exact* segment vertex whenever the perpendicular
//! foot falls on or beyond a segment end, never an interpolated near-copy.

use geo::{Coord, Line, LineString};

use crate::{CoreError, CoreResult, Direction};

// ── Projection ────────────────────────────────────────────────────────────────

/// Result of projecting a point perpendicularly onto a polyline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineProjection {
    /// Nearest point on the polyline.
    pub point: Coord<f64>,
    /// Zero-based index of the segment holding `point`; the segment runs
    /// from vertex `segment` to vertex `segment + 1`.
    pub segment: usize,
    /// Arc length from the first vertex to `point`.
    pub along: f64,
    /// Euclidean distance from the query point to `point`.
    pub distance: f64,
}

#[inline]
pub fn segment_length(line: Line<f64>) -> f64 {
    line.dx().hypot(line.dy())
}

/// Total Euclidean length of `line`.
pub fn line_length(line: &LineString<f64>) -> f64 {
    line.lines().map(segment_length).sum()
}

/// Nearest point of a single segment to `p`.
fn project_segment(seg: Line<f64>, p: Coord<f64>) -> Coord<f64> {
    let d = seg.delta();
    let len_2 = d.x * d.x + d.y * d.y;
    if len_2 == 0.0 {
        return seg.start;
    }
    let t = ((p.x - seg.start.x) * d.x + (p.y - seg.start.y) * d.y) / len_2;
    if t <= 0.0 {
        seg.start
    } else if t >= 1.0 {
        seg.end
    } else {
        Coord { x: seg.start.x + d.x * t, y: seg.start.y + d.y * t }
    }
}

#[inline]
fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Project `p` onto `line`.
///
/// The first segment with the strictly smallest distance wins, so a point
/// nearest to an interior vertex reports the segment *ending* at that vertex.
///
/// # Errors
///
/// [`CoreError::DegenerateLine`] when `line` has fewer than two vertices.
pub fn project(line: &LineString<f64>, p: Coord<f64>) -> CoreResult<LineProjection> {
    if line.0.len() < 2 {
        return Err(CoreError::DegenerateLine(line.0.len()));
    }

    let mut best: Option<(usize, Coord<f64>, f64)> = None;
    for (i, seg) in line.lines().enumerate() {
        let foot = project_segment(seg, p);
        let d = distance(foot, p);
        if best.is_none_or(|(_, _, best_d)| d < best_d) {
            best = Some((i, foot, d));
        }
    }
    let Some((segment, point, dist)) = best else {
        return Err(CoreError::DegenerateLine(line.0.len()));
    };

    let along = line.0[..=segment]
        .windows(2)
        .map(|w| distance(w[0], w[1]))
        .sum::<f64>()
        + distance(line.0[segment], point);

    Ok(LineProjection { point, segment, along, distance: dist })
}

// ── Polyline assembly ─────────────────────────────────────────────────────────

/// Append the vertices of `src` to `dst`, reversed for [`Direction::Backward`].
pub fn append(dst: &mut Vec<Coord<f64>>, src: &LineString<f64>, direction: Direction) {
    match direction {
        Direction::Forward  => dst.extend(src.0.iter().copied()),
        Direction::Backward => dst.extend(src.0.iter().rev().copied()),
    }
}

/// Remove consecutive duplicate vertices.
pub fn prune(coords: &mut Vec<Coord<f64>>) {
    coords.dedup();
}

/// Concatenate polylines end to end, dropping the duplicate vertex at each
/// joint (and any other consecutive duplicates).
pub fn concat<'a, I>(parts: I) -> LineString<f64>
where
    I: IntoIterator<Item = (&'a LineString<f64>, Direction)>,
{
    let mut coords = Vec::new();
    for (part, direction) in parts {
        append(&mut coords, part, direction);
    }
    prune(&mut coords);
    LineString::new(coords)
}
