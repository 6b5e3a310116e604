//! Virtual-node encoding for turn-table graphs.
//!
//! In a turn-table graph every (feature, direction) pair is a node of its
//! own, so a turn restriction between two arcs is an ordinary edge between
//! two nodes and the search needs no special handling.
//!
//! | Arc                    | Node id    |
//! |------------------------|------------|
//! | `(f, Forward)`         | `2f`       |
//! | `(f, Backward)`        | `2f + 1`   |
//!
//! Intersections reuse the same scheme: `encode((isec, Forward))` is the
//! node a search *starts* from at that intersection, `encode((isec,
//! Backward))` the node it *ends* at.

use vn_core::{Arc, Direction, FeatureId, NodeId};

use crate::{GraphError, GraphResult};

/// Largest feature id whose virtual nodes fit in an `i64`.
pub const MAX_FEATURE: i64 = (i64::MAX - 1) / 2;

/// `true` if `feature` can be encoded.
#[inline]
pub fn is_encodable(feature: FeatureId) -> bool {
    (0..=MAX_FEATURE).contains(&feature.0)
}

/// Virtual node of `arc`.
///
/// # Errors
///
/// [`GraphError::InvalidEncoding`] when the feature id is negative or above
/// [`MAX_FEATURE`].
pub fn encode(arc: Arc) -> GraphResult<NodeId> {
    if !is_encodable(arc.feature) {
        return Err(GraphError::InvalidEncoding(arc.feature.0));
    }
    let base = arc.feature.0 * 2;
    Ok(NodeId(match arc.direction {
        Direction::Forward  => base,
        Direction::Backward => base + 1,
    }))
}

/// Arc represented by virtual node `node`; inverse of [`encode`].
///
/// # Errors
///
/// [`GraphError::InvalidEncoding`] for negative node ids, which no valid
/// feature encodes to.
pub fn decode(node: NodeId) -> GraphResult<Arc> {
    if node.0 < 0 {
        return Err(GraphError::InvalidEncoding(node.0));
    }
    let feature = FeatureId(node.0 / 2);
    Ok(if node.0 % 2 == 0 {
        Arc::forward(feature)
    } else {
        Arc::backward(feature)
    })
}

/// Virtual node a search leaves intersection `isec` from.
#[inline]
pub fn intersection_source(isec: FeatureId) -> GraphResult<NodeId> {
    encode(Arc::forward(isec))
}

/// Virtual node a search arrives at intersection `isec` on.
#[inline]
pub fn intersection_sink(isec: FeatureId) -> GraphResult<NodeId> {
    encode(Arc::backward(isec))
}
