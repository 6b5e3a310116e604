//! Unit tests for vn-graph.
//!
//! All tests use hand-built graphs; node ids are chosen sparse on purpose so
//! dense-index bugs show up.

#[cfg(test)]
mod helpers {
    use vn_core::{Cost, NodeId};

    use crate::{CostGraph, CostGraphBuilder};

    /// Plain graph: feature 1 joins nodes 1-2 (cost 4), feature 2 joins
    /// nodes 2-3 (cost 6), both directions open.
    pub fn three_nodes(node2: Cost) -> CostGraph {
        let mut b = CostGraphBuilder::new();
        b.add_node(NodeId(2), node2);
        add_line(&mut b, 1, 1, 2, 4.0);
        add_line(&mut b, 2, 2, 3, 6.0);
        b.build().unwrap()
    }

    pub fn add_line(b: &mut CostGraphBuilder, feature: i64, from: i64, to: i64, cost: f64) {
        b.add_arc(NodeId(from), NodeId(to), feature, Cost::Open(cost));
        b.add_arc(NodeId(to), NodeId(from), -feature, Cost::Open(cost));
    }

    /// Diamond 10 → {20, 30} → 40 with a cheap and an expensive branch.
    ///
    ///   10 ─f1(1)─ 20 ─f2(1)─ 40
    ///    └─f3(5)─ 30 ─f4(5)─┘
    pub fn diamond() -> CostGraph {
        let mut b = CostGraphBuilder::new();
        add_line(&mut b, 1, 10, 20, 1.0);
        add_line(&mut b, 2, 20, 40, 1.0);
        add_line(&mut b, 3, 10, 30, 5.0);
        add_line(&mut b, 4, 30, 40, 5.0);
        b.build().unwrap()
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use vn_core::{Cost, NodeId};

    use crate::{CostGraphBuilder, GraphError};

    #[test]
    fn empty_build() {
        let g = CostGraphBuilder::new().build().unwrap();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn arcs_create_nodes_with_zero_cost() {
        let mut b = CostGraphBuilder::new();
        b.add_arc(NodeId(7), NodeId(9), 1, Cost::Open(2.0));
        let g = b.build().unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.node_cost(NodeId(7)), Some(Cost::ZERO));
        assert_eq!(g.node_cost(NodeId(8)), None);
    }

    #[test]
    fn add_node_overrides_cost() {
        let mut b = CostGraphBuilder::new();
        b.add_arc(NodeId(1), NodeId(2), 1, Cost::Open(1.0));
        b.add_node(NodeId(2), Cost::Closed);
        let g = b.build().unwrap();
        assert_eq!(g.node_cost(NodeId(2)), Some(Cost::Closed));
    }

    #[test]
    fn csr_groups_edges_by_source() {
        let mut b = CostGraphBuilder::new();
        b.add_arc(NodeId(1), NodeId(2), 10, Cost::Open(1.0));
        b.add_arc(NodeId(2), NodeId(3), 20, Cost::Open(1.0));
        b.add_arc(NodeId(1), NodeId(3), 11, Cost::Open(1.0));
        let g = b.build().unwrap();

        let n1 = g.node_ix(NodeId(1)).unwrap();
        let labels: Vec<i64> = g.out_edges(n1).map(|e| g.edge_label(e)).collect();
        assert_eq!(labels, vec![10, 11], "insertion order kept per node");
        assert_eq!(g.out_degree(g.node_ix(NodeId(3)).unwrap()), 0);
    }

    #[test]
    fn negative_open_cost_rejected() {
        let mut b = CostGraphBuilder::new();
        b.add_arc(NodeId(1), NodeId(2), 1, Cost::Open(-3.0));
        assert!(matches!(b.build(), Err(GraphError::MalformedGraph(_))));
    }

    #[test]
    fn nan_node_cost_rejected() {
        let mut b = CostGraphBuilder::new();
        b.add_node(NodeId(1), Cost::Open(f64::NAN));
        assert!(matches!(b.build(), Err(GraphError::MalformedGraph(_))));
    }

    #[test]
    fn graphs_get_distinct_uids() {
        let a = CostGraphBuilder::new().build().unwrap();
        let b = CostGraphBuilder::new().build().unwrap();
        assert_ne!(a.uid(), b.uid());
    }
}

// ── Clipper ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod clip {
    use vn_core::{Cost, NodeId};

    use crate::{ClipInput, Clipper, CostGraphBuilder, NodeCostClipper};

    #[test]
    fn charges_tail_node_except_origin() {
        let mut b = CostGraphBuilder::new();
        b.add_node(NodeId(1), Cost::Open(3.0));
        b.add_node(NodeId(2), Cost::Closed);
        b.add_arc(NodeId(1), NodeId(2), 1, Cost::Open(2.0));
        b.add_arc(NodeId(2), NodeId(1), -1, Cost::Open(2.0));
        let g = b.build().unwrap();

        let n1 = g.node_ix(NodeId(1)).unwrap();
        let n2 = g.node_ix(NodeId(2)).unwrap();
        let e12 = g.out_edges(n1).next().unwrap();
        let e21 = g.out_edges(n2).next().unwrap();
        let leave_1 = ClipInput { graph: &g, edge: e12, from: n1, to: n2, edge_cost: 2.0 };
        let leave_2 = ClipInput { graph: &g, edge: e21, from: n2, to: n1, edge_cost: 2.0 };

        assert_eq!(NodeCostClipper::new(n1).clip(&leave_1), Some(2.0));
        assert_eq!(NodeCostClipper::new(n2).clip(&leave_1), Some(5.0));
        assert_eq!(NodeCostClipper::new(n1).clip(&leave_2), None);
        assert_eq!(NodeCostClipper::new(n2).clip(&leave_2), Some(2.0));
    }

    #[test]
    fn closures_are_clippers() {
        let double = |input: &ClipInput<'_>| Some(input.edge_cost * 2.0);
        let g = super::helpers::three_nodes(Cost::ZERO);
        let n1 = g.node_ix(NodeId(1)).unwrap();
        let e = g.out_edges(n1).next().unwrap();
        let input = ClipInput { graph: &g, edge: e, from: n1, to: g.edge_to(e), edge_cost: 4.0 };
        assert_eq!(double.clip(&input), Some(8.0));
    }
}

// ── Search primitive ──────────────────────────────────────────────────────────

#[cfg(test)]
mod search {
    use approx::assert_abs_diff_eq;
    use test_log::test;
    use vn_core::NodeId;

    use super::helpers::diamond;
    use crate::search::{shortest_distance, shortest_path};
    use crate::{ClipInput, GraphError, NodeCostClipper, NodeIx, SearchCache};

    #[test]
    fn picks_cheaper_branch() {
        let g = diamond();
        let from = g.node_ix(NodeId(10)).unwrap();
        let to = g.node_ix(NodeId(40)).unwrap();
        let path = shortest_path(&g, from, to, &NodeCostClipper::new(from), None)
            .unwrap()
            .unwrap();
        let labels: Vec<i64> = path.steps.iter().map(|s| g.edge_label(s.edge)).collect();
        assert_eq!(labels, vec![1, 2]);
        assert_abs_diff_eq!(path.cost, 2.0);
        assert_abs_diff_eq!(path.steps[1].distance, 2.0);
    }

    #[test]
    fn custom_clipper_can_block_edges() {
        let g = diamond();
        let from = g.node_ix(NodeId(10)).unwrap();
        let to = g.node_ix(NodeId(40)).unwrap();
        let no_f1 = |i: &ClipInput<'_>| (i.graph.edge_label(i.edge) != 1).then_some(i.edge_cost);
        let d = shortest_distance(&g, from, to, &no_f1, None).unwrap();
        assert_eq!(d, Some(10.0));
    }

    #[test]
    fn negative_clipped_cost_is_malformed() {
        let g = diamond();
        let from = g.node_ix(NodeId(10)).unwrap();
        let to = g.node_ix(NodeId(40)).unwrap();
        let bad = |_: &ClipInput<'_>| Some(-1.0);
        assert!(matches!(
            shortest_distance(&g, from, to, &bad, None),
            Err(GraphError::MalformedGraph(_))
        ));
    }

    #[test]
    fn out_of_range_index_is_malformed() {
        let g = diamond();
        let from = g.node_ix(NodeId(10)).unwrap();
        let r = shortest_distance(&g, from, NodeIx(99), &NodeCostClipper::new(from), None);
        assert!(matches!(r, Err(GraphError::MalformedGraph(_))));
    }

    #[test]
    fn cache_resumes_and_matches_uncached() {
        let g = diamond();
        let from = g.node_ix(NodeId(10)).unwrap();
        let clip = NodeCostClipper::new(from);
        let mut cache = SearchCache::new();

        for target in [20, 40, 30, 40] {
            let to = g.node_ix(NodeId(target)).unwrap();
            let cached = shortest_path(&g, from, to, &clip, Some(&mut cache)).unwrap();
            let fresh = shortest_path(&g, from, to, &clip, None).unwrap();
            assert_eq!(cached, fresh, "target {target}");
        }
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(from));
    }

    #[test]
    fn failed_search_is_not_cached() {
        let g = diamond();
        let from = g.node_ix(NodeId(10)).unwrap();
        let to = g.node_ix(NodeId(30)).unwrap();
        let mut cache = SearchCache::new();

        // Fails on f3 after f1 out of 10 has already been relaxed.
        let bad_f3 = |i: &ClipInput<'_>| {
            Some(if i.graph.edge_label(i.edge) == 3 { f64::NAN } else { i.edge_cost })
        };
        let r = shortest_distance(&g, from, to, &bad_f3, Some(&mut cache));
        assert!(matches!(r, Err(GraphError::MalformedGraph(_))));
        assert!(!cache.contains(from));

        let d = shortest_distance(&g, from, to, &NodeCostClipper::new(from), Some(&mut cache));
        assert_eq!(d, Ok(Some(5.0)));
    }

    #[test]
    fn cache_resets_for_another_graph() {
        let a = diamond();
        let b = diamond();
        let mut cache = SearchCache::new();
        for g in [&a, &b] {
            let from = g.node_ix(NodeId(10)).unwrap();
            let to = g.node_ix(NodeId(40)).unwrap();
            let d = shortest_distance(g, from, to, &NodeCostClipper::new(from), Some(&mut cache));
            assert_eq!(d, Ok(Some(2.0)));
        }
        assert_eq!(cache.len(), 1);
    }
}

// ── Virtual-node encoder ──────────────────────────────────────────────────────

#[cfg(test)]
mod vnode {
    use vn_core::{Arc, Direction, FeatureId, NodeId};

    use crate::vnode::{MAX_FEATURE, decode, encode, intersection_sink, intersection_source};
    use crate::GraphError;

    #[test]
    fn round_trip() {
        for f in [0, 1, 2, 17, 1 << 40, MAX_FEATURE - 1, MAX_FEATURE] {
            for d in [Direction::Forward, Direction::Backward] {
                let arc = Arc::new(FeatureId(f), d);
                assert_eq!(decode(encode(arc).unwrap()), Ok(arc), "{arc}");
            }
        }
    }

    #[test]
    fn layout() {
        assert_eq!(encode(Arc::forward(FeatureId(1))), Ok(NodeId(2)));
        assert_eq!(encode(Arc::backward(FeatureId(1))), Ok(NodeId(3)));
        assert_eq!(encode(Arc::forward(FeatureId(2))), Ok(NodeId(4)));
        assert_eq!(intersection_source(FeatureId(9)), Ok(NodeId(18)));
        assert_eq!(intersection_sink(FeatureId(9)), Ok(NodeId(19)));
    }

    #[test]
    fn no_collisions_in_small_range() {
        let mut seen = std::collections::HashSet::new();
        for f in 0..500 {
            for d in [Direction::Forward, Direction::Backward] {
                assert!(seen.insert(encode(Arc::new(FeatureId(f), d)).unwrap()));
            }
        }
    }

    #[test]
    fn out_of_range_rejected() {
        assert_eq!(
            encode(Arc::forward(FeatureId(-1))),
            Err(GraphError::InvalidEncoding(-1))
        );
        assert_eq!(
            encode(Arc::backward(FeatureId(MAX_FEATURE + 1))),
            Err(GraphError::InvalidEncoding(MAX_FEATURE + 1))
        );
        assert_eq!(decode(NodeId(-4)), Err(GraphError::InvalidEncoding(-4)));
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod query {
    use approx::assert_abs_diff_eq;
    use test_log::test;
    use vn_core::{Arc, Cost, FeatureId, NodeId};

    use super::helpers::{add_line, three_nodes};
    use crate::{CostGraphBuilder, GraphError, SearchCache, find_distance, find_path};

    #[test]
    fn three_node_scenario() {
        let g = three_nodes(Cost::ZERO);
        let report = find_path(&g, NodeId(1), NodeId(3), None).unwrap();
        assert_eq!(
            report.arcs().collect::<Vec<_>>(),
            vec![Arc::forward(FeatureId(1)), Arc::forward(FeatureId(2))]
        );
        assert_abs_diff_eq!(report.cost, 10.0);
        assert_abs_diff_eq!(report.steps[0].cost, 4.0);
        assert_abs_diff_eq!(report.steps[1].distance, 10.0);
    }

    #[test]
    fn reverse_direction_reports_signed_features() {
        let g = three_nodes(Cost::ZERO);
        let report = find_path(&g, NodeId(3), NodeId(1), None).unwrap();
        assert_eq!(report.signed_features(), vec![-2, -1]);
    }

    #[test]
    fn node_cost_is_charged_when_passing_through() {
        let g = three_nodes(Cost::Open(1.5));
        assert_abs_diff_eq!(find_distance(&g, NodeId(1), NodeId(3), None).unwrap(), 11.5);
    }

    #[test]
    fn closed_node_blocks_passage_but_not_origin() {
        let g = three_nodes(Cost::Closed);
        assert_eq!(
            find_path(&g, NodeId(1), NodeId(3), None),
            Err(GraphError::Unreachable { from: NodeId(1), to: NodeId(3) })
        );
        let from_closed = find_path(&g, NodeId(2), NodeId(3), None).unwrap();
        assert_abs_diff_eq!(from_closed.cost, 6.0);
        // A closed node is still a valid destination.
        assert_abs_diff_eq!(find_distance(&g, NodeId(1), NodeId(2), None).unwrap(), 4.0);
    }

    #[test]
    fn same_node_short_circuits() {
        let g = three_nodes(Cost::ZERO);
        let report = find_path(&g, NodeId(2), NodeId(2), None).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.cost, 0.0);
        // Never looked up, so an unknown id is fine too.
        assert_eq!(find_distance(&g, NodeId(99), NodeId(99), None), Ok(0.0));
    }

    #[test]
    fn unknown_node_is_malformed() {
        let g = three_nodes(Cost::ZERO);
        assert!(matches!(
            find_path(&g, NodeId(1), NodeId(99), None),
            Err(GraphError::MalformedGraph(_))
        ));
    }

    #[test]
    fn closed_arc_is_never_used() {
        let mut b = CostGraphBuilder::new();
        b.add_arc(NodeId(1), NodeId(2), 1, Cost::Closed);
        b.add_arc(NodeId(2), NodeId(1), -1, Cost::Open(1.0));
        let g = b.build().unwrap();
        assert!(find_distance(&g, NodeId(1), NodeId(2), None).is_err());
        assert_eq!(find_distance(&g, NodeId(2), NodeId(1), None), Ok(1.0));
    }

    #[test]
    fn cached_queries_agree() {
        let mut b = CostGraphBuilder::new();
        add_line(&mut b, 1, 1, 2, 4.0);
        add_line(&mut b, 2, 2, 3, 6.0);
        add_line(&mut b, 3, 1, 3, 12.0);
        let g = b.build().unwrap();
        let mut cache = SearchCache::new();
        for (from, to) in [(1, 3), (1, 2), (3, 1), (1, 3)] {
            assert_eq!(
                find_path(&g, NodeId(from), NodeId(to), Some(&mut cache)),
                find_path(&g, NodeId(from), NodeId(to), None),
            );
        }
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn turn_restriction_scenario() {
        use crate::vnode::encode;

        let fwd1 = encode(Arc::forward(FeatureId(1))).unwrap();
        let bwd1 = encode(Arc::backward(FeatureId(1))).unwrap();
        let fwd2 = encode(Arc::forward(FeatureId(2))).unwrap();
        let bwd2 = encode(Arc::backward(FeatureId(2))).unwrap();
        assert_eq!((fwd1, bwd1), (NodeId(2), NodeId(3)));

        let mut b = CostGraphBuilder::turn_table([FeatureId(1), FeatureId(2)]);
        b.add_node(fwd1, Cost::Open(4.0));
        b.add_node(fwd2, Cost::Open(6.0));
        b.add_node(bwd2, Cost::Open(6.0));
        b.add_arc(fwd1, fwd2, 100, Cost::Closed);
        b.add_arc(fwd1, bwd2, 101, Cost::Open(1.0));
        b.add_arc(bwd1, fwd2, 102, Cost::Open(0.0));
        let g = b.build().unwrap();

        assert!(matches!(
            find_path(&g, fwd1, fwd2, None),
            Err(GraphError::Unreachable { .. })
        ));
        let turned = find_path(&g, fwd1, bwd2, None).unwrap();
        assert_eq!(turned.arcs().collect::<Vec<_>>(), vec![Arc::backward(FeatureId(2))]);
        assert_abs_diff_eq!(turned.cost, 1.0);
    }

    #[test]
    fn auxiliary_arcs_are_dropped() {
        use crate::vnode::{encode, intersection_sink, intersection_source};

        // Intersection 50 connects into feature 1 forward, which leads into
        // intersection 60.
        let isec_a = intersection_source(FeatureId(50)).unwrap();
        let isec_b = intersection_sink(FeatureId(60)).unwrap();
        let fwd1 = encode(Arc::forward(FeatureId(1))).unwrap();

        let mut b = CostGraphBuilder::turn_table([FeatureId(1)]);
        b.add_node(fwd1, Cost::Open(3.0));
        b.add_arc(isec_a, fwd1, 0, Cost::ZERO);
        b.add_arc(fwd1, isec_b, 0, Cost::ZERO);
        let g = b.build().unwrap();

        let report = find_path(&g, isec_a, isec_b, None).unwrap();
        assert_eq!(report.arcs().collect::<Vec<_>>(), vec![Arc::forward(FeatureId(1))]);
        assert_abs_diff_eq!(report.cost, 3.0);
    }
}
