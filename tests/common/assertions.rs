//! 断言与参照结果
//!
//! 暴力求解给出的代价序列用来检查并发搜索的结果

use std::cmp::Ordering;
use std::collections::HashMap;

use kpaths::core::{Cost, NodeKey};
use kpaths::graph::GraphStore;
use kpaths::search::Route;

/// 代价最低的 k 条 walk 的代价（升序）
///
/// 按代价逐层统计到达每个节点的 walk 数（超过 k 即截断）。
/// 要求所有权重至少为 1。
pub fn cheapest_walk_costs<N: NodeKey>(
    graph: &GraphStore<N>,
    source: &N,
    destination: &N,
    k: usize,
) -> Vec<Cost> {
    let mut costs = Vec::new();
    if k == 0 || !graph.contains(source) || !graph.contains(destination) {
        return costs;
    }

    // counts[c][v]: 从起点到 v、代价恰为 c 的 walk 数
    let mut counts: Vec<HashMap<&N, usize>> = Vec::new();
    for cost in 0..=4096usize {
        let mut layer: HashMap<&N, usize> = HashMap::new();
        if cost == 0 {
            layer.insert(source, 1);
        }
        for node in graph.nodes() {
            for (neighbor, &weight) in graph.neighbors_of(node) {
                let weight = weight as usize;
                debug_assert!(weight > 0, "oracle needs positive weights");
                if weight > cost {
                    continue;
                }
                if let Some(&n) = counts[cost - weight].get(node) {
                    let slot = layer.entry(neighbor).or_insert(0);
                    *slot = (*slot + n).min(k);
                }
            }
        }

        let here = layer.get(destination).copied().unwrap_or(0);
        for _ in 0..here.min(k - costs.len()) {
            costs.push(cost as Cost);
        }
        if costs.len() == k {
            break;
        }
        counts.push(layer);
    }
    costs
}

/// 所有无环路径的代价（升序），仅适用于小图
pub fn all_simple_path_costs<N: NodeKey>(
    graph: &GraphStore<N>,
    source: &N,
    destination: &N,
) -> Vec<Cost> {
    fn walk<N: NodeKey>(
        graph: &GraphStore<N>,
        path: &mut Vec<N>,
        cost: Cost,
        destination: &N,
        out: &mut Vec<Cost>,
    ) {
        let Some(tail) = path.last().cloned() else {
            return;
        };
        if &tail == destination {
            out.push(cost);
            return;
        }
        for (neighbor, &weight) in graph.neighbors_of(&tail) {
            if path.contains(neighbor) {
                continue;
            }
            path.push(neighbor.clone());
            walk(graph, path, cost + Cost::from(weight), destination, out);
            path.pop();
        }
    }

    let mut out = Vec::new();
    if graph.contains(source) && graph.contains(destination) {
        walk(graph, &mut vec![source.clone()], 0, destination, &mut out);
    }
    out.sort_unstable();
    out
}

/// 路径从起点到终点、每一步都是图中的边、代价等于权重之和
pub fn assert_valid_route<N: NodeKey>(
    graph: &GraphStore<N>,
    route: &Route<N>,
    source: &N,
    destination: &N,
) {
    let nodes = route.nodes();
    assert_eq!(nodes.first(), Some(source), "route {:?} starts elsewhere", route);
    assert_eq!(nodes.last(), Some(destination), "route {:?} ends elsewhere", route);

    let mut cost: Cost = 0;
    for pair in nodes.windows(2) {
        let weight = graph
            .weight(&pair[0], &pair[1])
            .unwrap_or_else(|| panic!("route {:?} uses a missing edge {:?}", route, pair));
        cost += Cost::from(weight);
    }
    assert_eq!(route.cost(), cost, "route {:?} has a wrong cost", route);
}

/// 按 (代价, 节点数, 自末端起的节点序列) 严格升序
pub fn assert_ranked<N: NodeKey>(routes: &[Route<N>]) {
    for pair in routes.windows(2) {
        assert!(
            pair[0].rank_cmp(&pair[1]) == Ordering::Less,
            "routes out of order: {:?} before {:?}",
            pair[0],
            pair[1]
        );
    }
}

/// 路径互不相同且不重复经过节点
pub fn assert_distinct_simple<N: NodeKey>(routes: &[Route<N>]) {
    let sequences: Vec<Vec<N>> = routes.iter().map(|r| r.nodes()).collect();
    for (i, nodes) in sequences.iter().enumerate() {
        let mut sorted = nodes.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), nodes.len(), "route {:?} revisits a node", nodes);
        assert!(
            !sequences[..i].contains(nodes),
            "route {:?} returned twice",
            nodes
        );
    }
}
