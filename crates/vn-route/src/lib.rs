//! `vn-route` — network handle, snapping, and coordinate-to-coordinate
//! routing for the `vnet` routing engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`network`]  | `Network`, `Feature`, `Endpoint`                           |
//! | [`builder`]  | `NetworkBuilder` (plain and turn-table)                    |
//! | [`snap`]     | `snap`, `Snap`, `SnapCandidate`, `SnapDirection`           |
//! | [`router`]   | `route`, `route_with`, `PathFinder`, `GraphPathFinder`     |
//! | [`report`]   | `Route`                                                    |
//! | [`config`]   | `RouteConfig`                                              |
//! | [`error`]    | `RouteError`, `RouteResult<T>`                             |
//! | `parallel`   | `route_many` (feature `parallel`)                          |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Adds `parallel::route_many` on Rayon's thread pool.    |
//! | `serde`    | Derives `Serialize`/`Deserialize` on config and results. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use geo::coord;
//! use vn_route::{NetworkBuilder, RouteConfig, route};
//!
//! let mut b = NetworkBuilder::new();
//! // b.add_line(..) for every network line
//! let network = b.build()?;
//! let r = route(&network, coord! { x: 1.0, y: 2.0 }, coord! { x: 40.0, y: 7.5 }, &RouteConfig::default())?;
//! println!("cost {} over {} arcs", r.cost, r.steps.len());
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod network;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod report;
pub mod router;
pub mod snap;


pub use builder::NetworkBuilder;
pub use config::RouteConfig;
pub use error::{RouteError, RouteResult};
pub use network::{Endpoint, Feature, Network};
pub use report::Route;
pub use router::{GraphPathFinder, PathFinder, route, route_with};
pub use snap::{Snap, SnapCandidate, SnapDirection, snap};
