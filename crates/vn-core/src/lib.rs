//! `vn-core` — foundational types for the `vnet` network routing engine.
//!
//! This crate is a dependency of every other `vn-*` crate.  It intentionally
//! has no `vn-*` dependencies and minimal external ones (only `geo` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `FeatureId`, `NodeId`                                   |
//! | [`arc`]       | `Direction`, `Arc` (one directed traversal of a feature) |
//! | [`cost`]      | `Cost` (`Open(f64)` / `Closed`)                         |
//! | [`geom`]      | planar projection, length, polyline concatenation       |
//! | [`error`]     | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod arc;
pub mod cost;
pub mod error;
pub mod geom;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use arc::{Arc, Direction};
pub use cost::Cost;
pub use error::{CoreError, CoreResult};
pub use ids::{FeatureId, NodeId};
