//! Dijkstra search primitive over a [`CostGraph`], with optional caching.
//!
//! # Resumable trees
//!
//! A search from one origin is a search tree: the distance labels, parent
//! edges and frontier of a Dijkstra run.  The run stops as soon as the
//! requested target is settled, leaving the frontier intact, so a later
//! query from the same origin to a different target continues where the last
//! one stopped instead of starting over.
//!
//! [`SearchCache`] keeps one tree per origin.  All trees in one cache must be
//! grown with the same clipping policy; `find_path` / `find_distance` always
//! use [`NodeCostClipper`](crate::NodeCostClipper) for the tree's origin.
//!
//! # Tie-breaking
//!
//! Equal-cost frontier entries pop in ascending `NodeIx` order, and edges of
//! one node are relaxed in insertion order with a strict `<` improvement test,
//! so results are reproducible for a given build order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::trace;
use rustc_hash::FxHashMap;

use crate::clip::{ClipInput, Clipper};
use crate::graph::{CostGraph, EdgeIx, NodeIx};
use crate::{GraphError, GraphResult};

// ── Frontier ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug)]
struct Frontier {
    cost: f64,
    node: NodeIx,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    // Reversed: BinaryHeap is a max-heap.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

// ── SearchTree ────────────────────────────────────────────────────────────────

/// State of a (possibly unfinished) Dijkstra run from one origin.
#[derive(Clone, Debug)]
struct SearchTree {
    origin: NodeIx,
    /// dist[v] = best known cost to reach v; `INFINITY` while unreached.
    dist:    Vec<f64>,
    /// parent[v] = edge that reached v; `EdgeIx::INVALID` for unreached nodes
    /// and the origin.
    parent:  Vec<EdgeIx>,
    /// Clipped cost of `parent[v]`.
    via:     Vec<f64>,
    settled: Vec<bool>,
    heap:    BinaryHeap<Frontier>,
}

impl SearchTree {
    fn new(graph: &CostGraph, origin: NodeIx) -> Self {
        let n = graph.node_count();
        let mut dist = vec![f64::INFINITY; n];
        dist[origin.index()] = 0.0;
        let mut heap = BinaryHeap::with_capacity(64);
        heap.push(Frontier { cost: 0.0, node: origin });
        Self {
            origin,
            dist,
            parent: vec![EdgeIx::INVALID; n],
            via: vec![0.0; n],
            settled: vec![false; n],
            heap,
        }
    }

    /// Grow the tree until `target` is settled or the frontier is exhausted.
    ///
    /// Returns `true` when `target` is reachable.
    fn grow_until<C: Clipper + ?Sized>(
        &mut self,
        graph: &CostGraph,
        target: NodeIx,
        clip: &C,
    ) -> GraphResult<bool> {
        if self.settled[target.index()] {
            return Ok(true);
        }

        while let Some(Frontier { cost, node }) = self.heap.pop() {
            // Skip stale heap entries.
            if self.settled[node.index()] || cost > self.dist[node.index()] {
                continue;
            }
            self.settled[node.index()] = true;

            for edge in graph.out_edges(node) {
                let Some(edge_cost) = graph.edge_cost(edge).value() else {
                    continue;
                };
                let head = graph.edge_to(edge);
                if self.settled[head.index()] {
                    continue;
                }
                let input = ClipInput { graph, edge, from: node, to: head, edge_cost };
                let Some(step) = clip.clip(&input) else {
                    continue;
                };
                if !step.is_finite() || step < 0.0 {
                    return Err(GraphError::MalformedGraph(format!(
                        "clipped cost {step} on edge {} is not a finite non-negative value",
                        graph.edge_label(edge)
                    )));
                }

                let new_cost = cost + step;
                if new_cost < self.dist[head.index()] {
                    self.dist[head.index()] = new_cost;
                    self.parent[head.index()] = edge;
                    self.via[head.index()] = step;
                    self.heap.push(Frontier { cost: new_cost, node: head });
                }
            }

            if node == target {
                return Ok(true);
            }
        }

        trace!(
            "search: frontier exhausted from {} before reaching {}",
            graph.node_id(self.origin),
            graph.node_id(target)
        );
        Ok(false)
    }

    fn path_to(&self, graph: &CostGraph, target: NodeIx) -> RawPath {
        let mut edges = Vec::new();
        let mut cur = target;
        loop {
            let e = self.parent[cur.index()];
            if e == EdgeIx::INVALID {
                break;
            }
            edges.push(e);
            cur = graph.edge_from(e);
        }
        edges.reverse();

        let mut distance = 0.0;
        let steps = edges
            .into_iter()
            .map(|edge| {
                let to = graph.edge_to(edge);
                let cost = self.via[to.index()];
                distance += cost;
                RawStep { edge, from: graph.edge_from(edge), to, cost, distance }
            })
            .collect();

        RawPath { steps, cost: self.dist[target.index()] }
    }
}

// ── Raw results ───────────────────────────────────────────────────────────────

/// One edge of a search result, before arc decoding.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RawStep {
    pub edge:     EdgeIx,
    pub from:     NodeIx,
    pub to:       NodeIx,
    /// Clipped cost of this step.
    pub cost:     f64,
    /// Cumulative cost from the origin up to and including this step.
    pub distance: f64,
}

/// Edge sequence of a lowest-cost path.
#[derive(Clone, Debug, PartialEq)]
pub struct RawPath {
    pub steps: Vec<RawStep>,
    pub cost:  f64,
}

// ── SearchCache ───────────────────────────────────────────────────────────────

/// Caller-owned store of resumable search trees, keyed by origin.
///
/// A cache is bound to the graph it was first used with; handing it a
/// different graph discards every stored tree.  It performs no locking:
/// share it across threads only behind the caller's own synchronisation, or
/// give each worker its own.
#[derive(Debug, Default)]
pub struct SearchCache {
    graph_uid: Option<u64>,
    trees:     FxHashMap<NodeIx, SearchTree>,
}

impl SearchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.graph_uid = None;
        self.trees.clear();
    }

    /// Number of cached origins.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn contains(&self, origin: NodeIx) -> bool {
        self.trees.contains_key(&origin)
    }

    fn tree(&mut self, graph: &CostGraph, origin: NodeIx) -> &mut SearchTree {
        if self.graph_uid != Some(graph.uid()) {
            if self.graph_uid.is_some() {
                trace!("search cache: graph changed, dropping {} trees", self.trees.len());
            }
            self.trees.clear();
            self.graph_uid = Some(graph.uid());
        }
        self.trees
            .entry(origin)
            .or_insert_with(|| SearchTree::new(graph, origin))
    }
}

// ── Primitive ─────────────────────────────────────────────────────────────────

fn check_ix(graph: &CostGraph, ix: NodeIx) -> GraphResult<()> {
    if ix.index() < graph.node_count() {
        Ok(())
    } else {
        Err(GraphError::MalformedGraph(format!(
            "node index {} out of range ({} nodes)",
            ix.0,
            graph.node_count()
        )))
    }
}

fn with_tree<C, R>(
    graph: &CostGraph,
    from: NodeIx,
    to: NodeIx,
    clip: &C,
    cache: Option<&mut SearchCache>,
    read: impl FnOnce(&SearchTree) -> R,
) -> GraphResult<Option<R>>
where
    C: Clipper + ?Sized,
{
    check_ix(graph, from)?;
    check_ix(graph, to)?;

    match cache {
        Some(cache) => {
            let tree = cache.tree(graph, from);
            match tree.grow_until(graph, to, clip) {
                Ok(found) => Ok(found.then(|| read(tree))),
                Err(e) => {
                    // Half-relaxed node: the tree cannot be resumed.
                    cache.trees.remove(&from);
                    Err(e)
                }
            }
        }
        None => {
            let mut tree = SearchTree::new(graph, from);
            Ok(tree.grow_until(graph, to, clip)?.then(|| read(&tree)))
        }
    }
}

/// Lowest-cost path from `from` to `to`, `None` when `to` is unreachable.
///
/// # Errors
///
/// [`GraphError::MalformedGraph`] for out-of-range indices or a clipper that
/// yields a negative or non-finite cost.
pub fn shortest_path<C: Clipper + ?Sized>(
    graph: &CostGraph,
    from: NodeIx,
    to: NodeIx,
    clip: &C,
    cache: Option<&mut SearchCache>,
) -> GraphResult<Option<RawPath>> {
    with_tree(graph, from, to, clip, cache, |tree| tree.path_to(graph, to))
}

/// Lowest cost from `from` to `to`, `None` when `to` is unreachable.
///
/// # Errors
///
/// As [`shortest_path`].
pub fn shortest_distance<C: Clipper + ?Sized>(
    graph: &CostGraph,
    from: NodeIx,
    to: NodeIx,
    clip: &C,
    cache: Option<&mut SearchCache>,
) -> GraphResult<Option<f64>> {
    with_tree(graph, from, to, clip, cache, |tree| tree.dist[to.index()])
}
