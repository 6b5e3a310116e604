//! Per-query routing options.

/// Options for [`route`](crate::route) and [`route_many`](crate::parallel).
///
/// Plain data; build one with struct-update syntax over `Default`:
///
/// ```
/// use vn_route::RouteConfig;
///
/// let config = RouteConfig { max_from_distance: 50.0, ..RouteConfig::default() };
/// assert!(config.max_to_distance.is_infinite());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouteConfig {
    /// Search radius around the start coordinate.  `f64::INFINITY` means
    /// unbounded.
    pub max_from_distance: f64,

    /// Search radius around the end coordinate.
    pub max_to_distance: f64,

    /// Keep resumable search trees between the candidate-pair searches of
    /// one query (and, in [`route_many`](crate::parallel), between the
    /// queries of one worker).
    pub use_cache: bool,

    /// Fill [`Route::junctions`](crate::Route::junctions).
    pub collect_nodes: bool,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            max_from_distance: f64::INFINITY,
            max_to_distance:   f64::INFINITY,
            use_cache:         true,
            collect_nodes:     false,
        }
    }
}
