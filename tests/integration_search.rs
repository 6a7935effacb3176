//! 搜索集成测试
//!
//! 测试范围：
//! - 三角形等固定场景
//! - 每节点上限不变量
//! - 结果按排名升序、路径合法
//! - 与暴力求解结果比对（walk 与无环两种模式都完全一致）
//! - 多线程下结果路径确定

mod common;

use common::assertions::{
    all_simple_path_costs, assert_distinct_simple, assert_ranked, assert_valid_route,
    cheapest_walk_costs,
};
use common::data_fixtures::{diamond, grid, random_graph, star, triangle};
use kpaths::graph::GraphStore;
use kpaths::search::{
    find_k_shortest_paths, GlobalLedger, KShortestPaths, Ledger, LedgerKind, RouteMode,
    SearchOptions, ShardedLedger,
};

const KINDS: [LedgerKind; 2] = [LedgerKind::Sharded, LedgerKind::Global];

fn options(workers: usize, ledger: LedgerKind, mode: RouteMode) -> SearchOptions {
    SearchOptions::new()
        .with_workers(workers)
        .with_ledger(ledger)
        .with_mode(mode)
}

// ==================== 固定场景 ====================

#[test]
fn test_triangle_scenario() {
    let graph = triangle();
    for kind in KINDS {
        for workers in [1, 2, 8] {
            let outcome = KShortestPaths::new(&graph)
                .with_options(options(workers, kind, RouteMode::Simple))
                .search(&"A", &"C", 2);
            let nodes: Vec<_> = outcome.routes.iter().map(|r| r.nodes()).collect();
            assert_eq!(nodes, vec![vec!["A", "B", "C"], vec!["A", "C"]]);
            assert_eq!(outcome.costs(), vec![2, 5]);
        }
    }
}

#[test]
fn test_unknown_destination_is_empty() {
    let graph = triangle();
    assert!(find_k_shortest_paths(&graph, &"A", &"Z", 3).is_empty());
}

#[test]
fn test_k_zero_is_empty() {
    let graph = triangle();
    assert!(find_k_shortest_paths(&graph, &"A", &"C", 0).is_empty());
}

#[test]
fn test_empty_graph() {
    let graph: GraphStore<u32> = GraphStore::new();
    assert!(find_k_shortest_paths(&graph, &0, &1, 3).is_empty());
}

#[test]
fn test_disconnected_destination() {
    let graph = GraphStore::from_edges([("A", "B", 1), ("C", "D", 1)]);
    for workers in [1, 4] {
        let outcome = KShortestPaths::new(&graph)
            .with_options(SearchOptions::new().with_workers(workers))
            .search(&"A", &"D", 3);
        assert!(outcome.is_empty());
    }
}

#[test]
fn test_equal_cost_routes() {
    let graph = diamond();
    for workers in [1, 8] {
        let outcome = KShortestPaths::new(&graph)
            .with_options(SearchOptions::new().with_workers(workers))
            .search(&"S", &"T", 3);
        assert_eq!(outcome.costs(), vec![2, 2, 3]);
        let nodes: Vec<_> = outcome.routes.iter().map(|r| r.nodes()).collect();
        // 等价代价按节点数，再按自末端起的节点序列
        assert_eq!(
            nodes,
            vec![vec!["S", "A", "T"], vec!["S", "B", "T"], vec!["S", "T"]]
        );
    }

    // 名额不够时留下排名靠前的一条
    let outcome = KShortestPaths::new(&graph)
        .with_options(SearchOptions::new().with_workers(8))
        .search(&"S", &"T", 1);
    assert_eq!(outcome.routes[0].nodes(), vec!["S", "A", "T"]);
}

#[test]
fn test_more_workers_than_routes() {
    let graph = GraphStore::from_edges([("A", "B", 4)]);
    let outcome = KShortestPaths::new(&graph)
        .with_options(SearchOptions::new().with_workers(16))
        .search(&"A", &"B", 5);
    assert_eq!(outcome.costs(), vec![4]);
}

// ==================== 不变量 ====================

#[test]
fn test_cap_invariant_holds_for_every_node() {
    let graph = grid(6);
    let k = 3;
    let ledgers: [Box<dyn Ledger<u32>>; 2] =
        [Box::new(ShardedLedger::new(k)), Box::new(GlobalLedger::new(k))];
    for ledger in ledgers {
        let outcome = KShortestPaths::new(&graph)
            .with_options(SearchOptions::new().with_workers(4).with_mode(RouteMode::Walk))
            .search_with_ledger(ledger.as_ref(), &0, &35);
        assert_eq!(outcome.routes.len(), k);
        for node in graph.nodes() {
            assert!(ledger.admitted(node) <= k, "node {} over cap", node);
            assert_ranked(&ledger.routes_for(node));
        }
    }
}

#[test]
fn test_routes_are_valid_and_ranked() {
    let graph = grid(5);
    for mode in [RouteMode::Simple, RouteMode::Walk] {
        let outcome = KShortestPaths::new(&graph)
            .with_options(SearchOptions::new().with_workers(4).with_mode(mode))
            .search(&0, &24, 10);
        assert_eq!(outcome.routes.len(), 10);
        assert_ranked(&outcome.routes);
        for route in &outcome.routes {
            assert_valid_route(&graph, route, &0, &24);
        }
        if mode == RouteMode::Simple {
            assert_distinct_simple(&outcome.routes);
        }
    }
}

// ==================== 与暴力求解比对 ====================

#[test]
fn test_walk_mode_matches_oracle() {
    for seed in 0..8 {
        let graph = random_graph(seed, 9, 12, 9);
        let expected = cheapest_walk_costs(&graph, &0, &8, 6);
        for kind in KINDS {
            for workers in [1, 4] {
                for k in [1, 6] {
                    let outcome = KShortestPaths::new(&graph)
                        .with_options(options(workers, kind, RouteMode::Walk))
                        .search(&0, &8, k);
                    assert_eq!(
                        outcome.costs(),
                        expected[..k].to_vec(),
                        "seed {} ledger {} workers {} k {}",
                        seed,
                        kind,
                        workers,
                        k
                    );
                    for route in &outcome.routes {
                        assert_valid_route(&graph, route, &0, &8);
                    }
                }
            }
        }
    }
}

#[test]
fn test_walk_mode_source_is_destination() {
    let graph = random_graph(42, 6, 6, 5);
    let expected = cheapest_walk_costs(&graph, &3, &3, 4);
    assert_eq!(expected[0], 0);
    let outcome = KShortestPaths::new(&graph)
        .with_options(options(3, LedgerKind::Sharded, RouteMode::Walk))
        .search(&3, &3, 4);
    assert_eq!(outcome.costs(), expected);
}

#[test]
fn test_simple_mode_against_enumeration() {
    for seed in 0..8 {
        let graph = random_graph(seed, 8, 8, 9);
        let all = all_simple_path_costs(&graph, &0, &7);
        assert!(!all.is_empty());
        for workers in [1, 4] {
            for kind in KINDS {
                for k in [1, 5, 12] {
                    let outcome = KShortestPaths::new(&graph)
                        .with_options(options(workers, kind, RouteMode::Simple))
                        .search(&0, &7, k);
                    assert_eq!(
                        outcome.costs(),
                        all[..k.min(all.len())].to_vec(),
                        "seed {} ledger {} workers {} k {}",
                        seed,
                        kind,
                        workers,
                        k
                    );
                    assert_distinct_simple(&outcome.routes);
                    assert_ranked(&outcome.routes);
                    for route in &outcome.routes {
                        assert_valid_route(&graph, route, &0, &7);
                    }
                }
            }
        }
    }
}

// ==================== 确定性 ====================

#[test]
fn test_equal_cost_ties_are_deterministic() {
    // 40 条代价同为 2 的路径争 3 个名额
    let graph = star(40);
    let expected = vec![vec![0, 1, 1000], vec![0, 2, 1000], vec![0, 3, 1000]];
    for mode in [RouteMode::Walk, RouteMode::Simple] {
        for kind in KINDS {
            for _ in 0..50 {
                let outcome = KShortestPaths::new(&graph)
                    .with_options(options(8, kind, mode))
                    .search(&0, &1000, 3);
                let nodes: Vec<_> = outcome.routes.iter().map(|r| r.nodes()).collect();
                assert_eq!(nodes, expected, "{} ledger, {} mode", kind, mode);
            }
        }
    }
}

#[test]
fn test_routes_are_deterministic() {
    let graph = random_graph(7, 12, 20, 6);
    for mode in [RouteMode::Walk, RouteMode::Simple] {
        let baseline: Vec<_> = KShortestPaths::new(&graph)
            .with_options(options(1, LedgerKind::Sharded, mode))
            .search(&0, &11, 8)
            .routes
            .iter()
            .map(|r| r.nodes())
            .collect();
        for _ in 0..10 {
            for kind in KINDS {
                let nodes: Vec<_> = KShortestPaths::new(&graph)
                    .with_options(options(8, kind, mode))
                    .search(&0, &11, 8)
                    .routes
                    .iter()
                    .map(|r| r.nodes())
                    .collect();
                assert_eq!(nodes, baseline, "{} ledger, {} mode", kind, mode);
            }
        }
    }
}

#[test]
fn test_single_worker_sequence_is_repeatable() {
    let graph = grid(4);
    let search = KShortestPaths::new(&graph).with_options(SearchOptions::new().with_workers(1));
    let first: Vec<_> = search.search(&0, &15, 6).routes.iter().map(|r| r.nodes()).collect();
    for _ in 0..5 {
        let again: Vec<_> = search.search(&0, &15, 6).routes.iter().map(|r| r.nodes()).collect();
        assert_eq!(again, first);
    }
}

#[test]
fn test_graph_build_is_idempotent() {
    let edges = [("A", "B", 1), ("B", "C", 1), ("A", "C", 5)];
    let mut twice = GraphStore::from_edges(edges);
    twice.extend_edges(edges);
    let once = triangle();

    for node in ["A", "B", "C"] {
        assert_eq!(once.neighbors_of(&node), twice.neighbors_of(&node));
    }
    assert_eq!(
        find_k_shortest_paths(&once, &"A", &"C", 3),
        find_k_shortest_paths(&twice, &"A", &"C", 3)
    );
}
