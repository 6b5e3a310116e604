//! Path reports returned by [`find_path`](crate::find_path).

use vn_core::{Arc, FeatureId};

/// One traversed arc with its cost.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathStep {
    pub arc:      Arc,
    /// Cost charged for this step, including the node cost of the junction
    /// it leaves.
    pub cost:     f64,
    /// Cumulative cost from the path origin up to and including this step.
    pub distance: f64,
}

/// Lowest-cost path between two graph nodes.
///
/// In turn-table graphs `cost` also covers steps over auxiliary arcs that
/// were left out of `steps`, so it may exceed the sum of the step costs.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathReport {
    pub steps: Vec<PathStep>,
    pub cost:  f64,
}

impl PathReport {
    /// Zero-cost report with no steps (`from == to`).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn arcs(&self) -> impl Iterator<Item = Arc> + '_ {
        self.steps.iter().map(|s| s.arc)
    }

    /// Signed feature ids, negative for backward traversal.
    pub fn signed_features(&self) -> Vec<i64> {
        self.arcs().map(Arc::signed).collect()
    }

    /// Features in path order, ignoring direction.
    pub fn features(&self) -> Vec<FeatureId> {
        self.arcs().map(|a| a.feature).collect()
    }
}
