//! Strongly typed identifier wrappers.
//!
//! Both IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub`; IDs are
//! caller-assigned and sparse, so unlike dense indices they are never used to
//! index a `Vec` directly.

use std::fmt;

/// Generate a typed ID wrapper around a signed 64-bit integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub i64);

        impl $name {
            /// Sentinel meaning "no valid ID", equal to `i64::MIN`.
            pub const INVALID: $name = $name(i64::MIN);

            #[inline(always)]
            pub fn get(self) -> i64 {
                self.0
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<i64> for $name {
            #[inline(always)]
            fn from(n: i64) -> $name {
                $name(n)
            }
        }

        impl From<$name> for i64 {
            #[inline(always)]
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

typed_id! {
    /// Identifier of one line feature in the network.
    ///
    /// In turn-table networks intersections carry identifiers from the same
    /// space, so feature and intersection ids must not collide.
    pub struct FeatureId;
}

typed_id! {
    /// Identity of a node in a cost graph.
    ///
    /// A topological junction in plain networks, a virtual node (see
    /// `vn_graph::vnode`) in turn-table networks.
    pub struct NodeId;
}
