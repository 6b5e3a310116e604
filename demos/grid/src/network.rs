//! Synthetic grid network shared by the demo.
//!
//! `SIZE × SIZE` junctions `SPACING` units apart.  Junction `(row, col)` has
//! id `row * SIZE + col + 1`.  Horizontal lines are numbered first, then
//! vertical ones.  Cost is length, except that row 2 is one-way eastbound.

use geo::{LineString, coord};

use vn_core::{Cost, FeatureId, NodeId};
use vn_route::{Network, NetworkBuilder, RouteResult};

pub const SIZE:    i64 = 6;
pub const SPACING: f64 = 100.0;

/// Junction id at `(row, col)`.
pub fn junction(row: i64, col: i64) -> NodeId {
    NodeId(row * SIZE + col + 1)
}

fn position(row: i64, col: i64) -> geo::Coord<f64> {
    coord! { x: col as f64 * SPACING, y: row as f64 * SPACING }
}

/// Build the grid; `closed` junctions cannot be passed through.
pub fn build_network(closed: &[NodeId]) -> RouteResult<Network> {
    let mut b = NetworkBuilder::new();
    let mut next_id = 1;
    let mut line = |b: &mut NetworkBuilder, from: (i64, i64), to: (i64, i64), backward: Cost| {
        let geometry = LineString::new(vec![position(from.0, from.1), position(to.0, to.1)]);
        b.add_line(
            FeatureId(next_id),
            junction(from.0, from.1),
            junction(to.0, to.1),
            geometry,
            Cost::Open(SPACING),
            backward,
        );
        next_id += 1;
    };

    for row in 0..SIZE {
        let backward = if row == 2 { Cost::Closed } else { Cost::Open(SPACING) };
        for col in 0..SIZE - 1 {
            line(&mut b, (row, col), (row, col + 1), backward);
        }
    }
    for col in 0..SIZE {
        for row in 0..SIZE - 1 {
            line(&mut b, (row, col), (row + 1, col), Cost::Open(SPACING));
        }
    }
    for &node in closed {
        b.add_junction(node, Cost::Closed);
    }
    b.build()
}
