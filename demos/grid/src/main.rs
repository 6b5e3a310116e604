//! `grid` — coordinate-to-coordinate routing over a synthetic street grid.
//!
//! Builds a 6×6 grid, routes a few off-network coordinate pairs, prints the
//! chosen routes as JSON, then re-runs the batch in parallel with one
//! junction closed.
//!
//! Run with:
//!   RUST_LOG=debug cargo run -p grid

mod network;

use anyhow::Result;
use geo::{Coord, coord};
use log::info;

use vn_route::parallel::route_many;
use vn_route::{RouteConfig, route};

use network::{SIZE, build_network, junction};

fn pairs() -> Vec<(Coord<f64>, Coord<f64>)> {
    vec![
        // Same street, no graph search.
        (coord! { x: 120.0, y: 5.0 }, coord! { x: 180.0, y: -5.0 }),
        // Across the grid.
        (coord! { x: 15.0, y: 40.0 }, coord! { x: 460.0, y: 470.0 }),
        // Westbound on the one-way row has to detour.
        (coord! { x: 350.0, y: 204.0 }, coord! { x: 150.0, y: 196.0 }),
    ]
}

fn main() -> Result<()> {
    env_logger::init();

    println!("=== grid: vnet routing demo ===");
    let network = build_network(&[])?;
    println!(
        "Network: {} lines, {} junctions ({SIZE}×{SIZE})",
        network.feature_count(),
        network.junction_count()
    );

    let config = RouteConfig { max_from_distance: 60.0, max_to_distance: 60.0, collect_nodes: true, ..RouteConfig::default() };

    for (from, to) in pairs() {
        let r = route(&network, from, to, &config)?;
        println!(
            "({}, {}) → ({}, {}): cost {:.1}, {} arcs{}",
            from.x, from.y, to.x, to.y,
            r.cost,
            r.steps.len(),
            if r.shortcut { " (shortcut)" } else { "" }
        );
        println!("{}", serde_json::to_string_pretty(&r)?);
    }

    // Close the centre junction and route the batch again in parallel.
    let blocked = junction(SIZE / 2, SIZE / 2);
    let network = build_network(&[blocked])?;
    info!("closed {blocked}");
    println!();
    println!("With {blocked} closed:");
    for ((from, to), result) in pairs().into_iter().zip(route_many(&network, &pairs(), &config)) {
        match result {
            Ok(r) => println!("  ({}, {}) → ({}, {}): cost {:.1}", from.x, from.y, to.x, to.y, r.cost),
            Err(e) => println!("  ({}, {}) → ({}, {}): {e}", from.x, from.y, to.x, to.y),
        }
    }

    Ok(())
}
