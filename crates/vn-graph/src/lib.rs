//! `vn-graph` — directed cost graph and shortest-path search.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`graph`]   | `CostGraph` (CSR), `CostGraphBuilder`, `GraphMode`           |
//! | [`clip`]    | `Clipper` trait, `NodeCostClipper`                           |
//! | [`search`]  | Dijkstra primitive, `SearchCache`                            |
//! | [`vnode`]   | virtual-node encoder/decoder for turn-table graphs           |
//! | [`query`]   | `find_path`, `find_distance`                                 |
//! | [`report`]  | `PathReport`, `PathStep`                                     |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on report types.           |

pub mod clip;
pub mod error;
pub mod graph;
pub mod query;
pub mod report;
pub mod search;
pub mod vnode;

#[cfg(test)]
mod tests;

pub use clip::{ClipInput, Clipper, NodeCostClipper};
pub use error::{GraphError, GraphResult};
pub use graph::{CostGraph, CostGraphBuilder, EdgeIx, GraphMode, NodeIx};
pub use query::{find_distance, find_path};
pub use report::{PathReport, PathStep};
pub use search::SearchCache;
