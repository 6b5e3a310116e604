//! Batch routing on Rayon's thread pool.
//!
//! Each worker owns one [`GraphPathFinder`], so search caches are never
//! shared between threads.

use geo::Coord;
use rayon::prelude::*;

use crate::network::Network;
use crate::router::{GraphPathFinder, route_with};
use crate::{Route, RouteConfig, RouteResult};

/// Route every `(from, to)` pair in `pairs`; results keep input order.
pub fn route_many(
    network: &Network,
    pairs: &[(Coord<f64>, Coord<f64>)],
    config: &RouteConfig,
) -> Vec<RouteResult<Route>> {
    pairs
        .par_iter()
        .map_init(
            || GraphPathFinder::new(config.use_cache),
            |finder, &(from, to)| route_with(network, from, to, config, finder),
        )
        .collect()
}
