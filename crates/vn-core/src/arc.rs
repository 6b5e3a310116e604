//! Traversal direction and the directed arc shared by every routing crate.

use std::fmt;

use crate::FeatureId;

/// Sense in which a line feature is traversed, relative to its digitized
/// vertex order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// From the first vertex towards the last.
    #[default]
    Forward,
    /// From the last vertex towards the first.
    Backward,
}

impl Direction {
    #[inline]
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Forward  => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Human-readable label, useful for log lines and report columns.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward  => "forward",
            Direction::Backward => "backward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Arc ───────────────────────────────────────────────────────────────────────

/// One directed traversal of a feature.
///
/// The *signed* form folds the direction into the sign of the feature id:
/// `+f` is forward, `-f` is backward.  Path reports and turn tables use it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    pub feature:   FeatureId,
    pub direction: Direction,
}

impl Arc {
    #[inline]
    pub fn new(feature: FeatureId, direction: Direction) -> Self {
        Self { feature, direction }
    }

    #[inline]
    pub fn forward(feature: FeatureId) -> Self {
        Self::new(feature, Direction::Forward)
    }

    #[inline]
    pub fn backward(feature: FeatureId) -> Self {
        Self::new(feature, Direction::Backward)
    }

    /// The same feature traversed the other way.
    #[inline]
    pub fn reverse(self) -> Self {
        Self::new(self.feature, self.direction.reverse())
    }

    /// Signed feature id: negative when traversed backward.
    #[inline]
    pub fn signed(self) -> i64 {
        match self.direction {
            Direction::Forward  => self.feature.0,
            Direction::Backward => -self.feature.0,
        }
    }

    /// Inverse of [`signed`](Self::signed).  Zero is read as forward.
    #[inline]
    pub fn from_signed(signed: i64) -> Self {
        if signed < 0 {
            Self::backward(FeatureId(-signed))
        } else {
            Self::forward(FeatureId(signed))
        }
    }
}

impl fmt::Display for Arc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.feature.0, self.direction)
    }
}
