//! Traversal cost of an arc or node.
//!
//! Attribute tables traditionally store `-1` for "closed".  [`Cost`] makes
//! that case a separate variant so "closed unless origin" is checked by the
//! type system; [`Cost::from_raw`] is the bridge for sentinel-encoded input.

use std::fmt;

use crate::{CoreError, CoreResult};

#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cost {
    /// Finite, non-negative cost.
    Open(f64),
    /// Not traversable.
    Closed,
}

impl Cost {
    pub const ZERO: Cost = Cost::Open(0.0);

    /// Interpret a sentinel-encoded value: any negative number is closed.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidCost`] for NaN and infinities.
    pub fn from_raw(value: f64) -> CoreResult<Cost> {
        if !value.is_finite() {
            return Err(CoreError::InvalidCost(value));
        }
        if value < 0.0 {
            Ok(Cost::Closed)
        } else {
            Ok(Cost::Open(value))
        }
    }

    #[inline]
    pub fn is_closed(self) -> bool {
        matches!(self, Cost::Closed)
    }

    #[inline]
    pub fn is_open(self) -> bool {
        !self.is_closed()
    }

    /// The cost value, `None` when closed.
    #[inline]
    pub fn value(self) -> Option<f64> {
        match self {
            Cost::Open(v) => Some(v),
            Cost::Closed  => None,
        }
    }

    /// `true` when the value may be stored in a graph: closed, or open with a
    /// finite non-negative value.
    #[inline]
    pub fn is_valid(self) -> bool {
        match self {
            Cost::Open(v) => v.is_finite() && v >= 0.0,
            Cost::Closed  => true,
        }
    }

    /// Sentinel-encoded form (`-1.0` when closed), the inverse of
    /// [`from_raw`](Self::from_raw) for valid costs.
    #[inline]
    pub fn to_raw(self) -> f64 {
        self.value().unwrap_or(-1.0)
    }
}

impl Default for Cost {
    fn default() -> Self {
        Cost::ZERO
    }
}

impl From<f64> for Cost {
    /// Wraps `value` as open without validation; graph builders reject
    /// negative or non-finite open costs.
    fn from(value: f64) -> Self {
        Cost::Open(value)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Open(v) => write!(f, "{v}"),
            Cost::Closed  => f.write_str("closed"),
        }
    }
}
