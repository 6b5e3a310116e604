//! Directed cost graph and builder.
//!
//! # Data layout
//!
//! Node ids are caller-assigned and sparse, so the builder maps each
//! [`NodeId`] to a dense [`NodeIx`] and stores outgoing edges in
//! **Compressed Sparse Row (CSR)** format.  Given a `NodeIx n`, its outgoing
//! edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_label`, `edge_cost`) are
//! sorted by source node and indexed by [`EdgeIx`].  Edges leaving the same
//! node keep their insertion order, which makes search tie-breaking
//! reproducible.
//!
//! # Labels
//!
//! Every edge carries an `i64` label.  Plain networks store the *signed*
//! feature id there (`+f` forward, `-f` backward); turn-table networks store
//! the turn or connector id, and path arcs are recovered from the head node
//! instead (see [`crate::vnode`]).

use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::{FxHashMap, FxHashSet};

use vn_core::{Cost, FeatureId, NodeId};

use crate::{GraphError, GraphResult};

static NEXT_GRAPH_UID: AtomicU64 = AtomicU64::new(1);

// ── Dense indices ─────────────────────────────────────────────────────────────

/// Dense index of a node inside one [`CostGraph`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct NodeIx(pub u32);

/// Dense index of a directed edge inside one [`CostGraph`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct EdgeIx(pub u32);

impl NodeIx {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeIx {
    /// Sentinel meaning "no edge" (unreached node, or the search origin).
    pub const INVALID: EdgeIx = EdgeIx(u32::MAX);

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ── GraphMode ─────────────────────────────────────────────────────────────────

/// How node identities of a graph are to be read.
#[derive(Clone, Debug, Default)]
pub enum GraphMode {
    /// Nodes are topological junctions; edge labels are signed feature ids.
    #[default]
    Plain,
    /// Nodes are virtual (feature, direction) states.  `real_features` is the
    /// registry of user-visible features; decoded arcs of any other feature
    /// (intersection connectors) are dropped from path reports.
    TurnTable { real_features: FxHashSet<FeatureId> },
}

// ── CostGraph ─────────────────────────────────────────────────────────────────

/// Directed graph with per-edge and per-node [`Cost`]s.
///
/// Immutable once built; share it by reference across threads.  Do not
/// construct directly; use [`CostGraphBuilder`].
#[derive(Debug)]
pub struct CostGraph {
    uid:  u64,
    mode: GraphMode,

    // ── Node data (indexed by NodeIx) ─────────────────────────────────────
    node_ids:   Vec<NodeId>,
    node_costs: Vec<Cost>,
    node_index: FxHashMap<NodeId, NodeIx>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// Outgoing edges of node `n` are `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeIx) ─────────────────────────────────────
    edge_from:  Vec<NodeIx>,
    edge_to:    Vec<NodeIx>,
    edge_label: Vec<i64>,
    edge_cost:  Vec<Cost>,
}

impl CostGraph {
    /// Process-unique identity of this graph.  Caches use it to detect being
    /// handed a different graph.
    #[inline]
    pub fn uid(&self) -> u64 {
        self.uid
    }

    pub fn mode(&self) -> &GraphMode {
        &self.mode
    }

    #[inline]
    pub fn is_turn_table(&self) -> bool {
        matches!(self.mode, GraphMode::TurnTable { .. })
    }

    /// `true` if `feature` is user-visible.  Always `true` for plain graphs.
    pub fn is_real_feature(&self, feature: FeatureId) -> bool {
        match &self.mode {
            GraphMode::Plain => true,
            GraphMode::TurnTable { real_features } => real_features.contains(&feature),
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    // ── Nodes ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn node_ix(&self, id: NodeId) -> Option<NodeIx> {
        self.node_index.get(&id).copied()
    }

    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    #[inline]
    pub fn node_id(&self, ix: NodeIx) -> NodeId {
        self.node_ids[ix.index()]
    }

    #[inline]
    pub fn node_cost_at(&self, ix: NodeIx) -> Cost {
        self.node_costs[ix.index()]
    }

    /// Stored cost of node `id`, `None` if the node is not in the graph.
    pub fn node_cost(&self, id: NodeId) -> Option<Cost> {
        self.node_ix(id).map(|ix| self.node_cost_at(ix))
    }

    // ── Edges ─────────────────────────────────────────────────────────────

    /// Iterator over the `EdgeIx`s of all outgoing edges from `node`.
    ///
    /// This is a contiguous index range; no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeIx) -> impl Iterator<Item = EdgeIx> + '_ {
        let start = self.node_out_start[node.index()];
        let end   = self.node_out_start[node.index() + 1];
        (start..end).map(EdgeIx)
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeIx) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    #[inline]
    pub fn edge_from(&self, edge: EdgeIx) -> NodeIx {
        self.edge_from[edge.index()]
    }

    #[inline]
    pub fn edge_to(&self, edge: EdgeIx) -> NodeIx {
        self.edge_to[edge.index()]
    }

    #[inline]
    pub fn edge_label(&self, edge: EdgeIx) -> i64 {
        self.edge_label[edge.index()]
    }

    #[inline]
    pub fn edge_cost(&self, edge: EdgeIx) -> Cost {
        self.edge_cost[edge.index()]
    }
}

// ── CostGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`CostGraph`] incrementally, then call [`build`](Self::build).
///
/// Nodes referenced by [`add_arc`](Self::add_arc) are created on demand with
/// zero cost; [`add_node`](Self::add_node) sets (or overrides) a node's cost.
///
/// # Example
///
/// ```
/// use vn_core::{Cost, NodeId};
/// use vn_graph::CostGraphBuilder;
///
/// let mut b = CostGraphBuilder::new();
/// b.add_arc(NodeId(1), NodeId(2), 1, Cost::Open(4.0));
/// b.add_arc(NodeId(2), NodeId(1), -1, Cost::Open(4.0));
/// let g = b.build().unwrap();
/// assert_eq!(g.node_count(), 2);
/// assert_eq!(g.edge_count(), 2);
/// ```
#[derive(Default)]
pub struct CostGraphBuilder {
    mode:      GraphMode,
    node_ids:  Vec<NodeId>,
    costs:     Vec<Cost>,
    index:     FxHashMap<NodeId, NodeIx>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:  NodeIx,
    to:    NodeIx,
    label: i64,
    cost:  Cost,
}

impl CostGraphBuilder {
    /// Builder for a plain (junction-node) graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder for a turn-table graph whose user-visible features are
    /// `real_features`.
    pub fn turn_table<I>(real_features: I) -> Self
    where
        I: IntoIterator<Item = FeatureId>,
    {
        Self {
            mode: GraphMode::TurnTable { real_features: real_features.into_iter().collect() },
            ..Self::default()
        }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(mut self, nodes: usize, edges: usize) -> Self {
        self.node_ids.reserve(nodes);
        self.costs.reserve(nodes);
        self.raw_edges.reserve(edges);
        self
    }

    fn intern(&mut self, id: NodeId) -> NodeIx {
        if let Some(&ix) = self.index.get(&id) {
            return ix;
        }
        let ix = NodeIx(self.node_ids.len() as u32);
        self.node_ids.push(id);
        self.costs.push(Cost::ZERO);
        self.index.insert(id, ix);
        ix
    }

    /// Register node `id` with `cost`, returning its dense index.
    pub fn add_node(&mut self, id: NodeId, cost: Cost) -> NodeIx {
        let ix = self.intern(id);
        self.costs[ix.index()] = cost;
        ix
    }

    /// Add a **directed** edge from `from` to `to`.
    ///
    /// Closed edges are kept (so they are visible to inspection) but the
    /// search never expands them.
    pub fn add_arc(&mut self, from: NodeId, to: NodeId, label: i64, cost: Cost) {
        let from = self.intern(from);
        let to   = self.intern(to);
        self.raw_edges.push(RawEdge { from, to, label, cost });
    }

    pub fn node_count(&self) -> usize { self.node_ids.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`CostGraph`].
    ///
    /// # Errors
    ///
    /// [`GraphError::MalformedGraph`] if any open cost is negative or not
    /// finite, or if the graph exceeds `u32` indexing.
    pub fn build(self) -> GraphResult<CostGraph> {
        let node_count = self.node_ids.len();
        let edge_count = self.raw_edges.len();

        if edge_count >= u32::MAX as usize || node_count >= u32::MAX as usize {
            return Err(GraphError::MalformedGraph(format!(
                "{node_count} nodes / {edge_count} edges exceed the u32 index space"
            )));
        }
        if let Some((i, cost)) = self.costs.iter().enumerate().find(|(_, c)| !c.is_valid()) {
            return Err(GraphError::MalformedGraph(format!(
                "node {} has invalid cost {cost}",
                self.node_ids[i]
            )));
        }
        if let Some(e) = self.raw_edges.iter().find(|e| !e.cost.is_valid()) {
            return Err(GraphError::MalformedGraph(format!(
                "edge {} has invalid cost {}",
                e.label, e.cost
            )));
        }

        // Stable sort keeps per-node insertion order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:  Vec<NodeIx> = raw.iter().map(|e| e.from).collect();
        let edge_to:    Vec<NodeIx> = raw.iter().map(|e| e.to).collect();
        let edge_label: Vec<i64>    = raw.iter().map(|e| e.label).collect();
        let edge_cost:  Vec<Cost>   = raw.iter().map(|e| e.cost).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        Ok(CostGraph {
            uid: NEXT_GRAPH_UID.fetch_add(1, Ordering::Relaxed),
            mode: self.mode,
            node_ids: self.node_ids,
            node_costs: self.costs,
            node_index: self.index,
            node_out_start,
            edge_from,
            edge_to,
            edge_label,
            edge_cost,
        })
    }
}
