//! 测试数据生成模块
//!
//! 提供各种测试图的生成函数

use kpaths::graph::GraphStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A-B 1, B-C 1, A-C 5
pub fn triangle() -> GraphStore<&'static str> {
    GraphStore::from_edges([("A", "B", 1), ("B", "C", 1), ("A", "C", 5)])
}

/// 两条等价代价的并行路线加一条捷径
///
/// ```text
/// S -1- A -1- T
/// S -1- B -1- T
/// S ------3-- T
/// ```
pub fn diamond() -> GraphStore<&'static str> {
    GraphStore::from_edges([
        ("S", "A", 1),
        ("A", "T", 1),
        ("S", "B", 1),
        ("B", "T", 1),
        ("S", "T", 3),
    ])
}

/// 0 经 1..=leaves 中任一节点到 1000，所有权重为 1
pub fn star(leaves: u32) -> GraphStore<u32> {
    let mut graph = GraphStore::new();
    for leaf in 1..=leaves {
        graph.insert_edge(0, leaf, 1);
        graph.insert_edge(leaf, 1000, 1);
    }
    graph
}

/// side x side 网格，权重随位置变化
pub fn grid(side: u32) -> GraphStore<u32> {
    let mut graph = GraphStore::new();
    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            if col + 1 < side {
                graph.insert_edge(id, id + 1, 1 + (id * 7) % 5);
            }
            if row + 1 < side {
                graph.insert_edge(id, id + side, 1 + (id * 3) % 4);
            }
        }
    }
    graph
}

/// 固定种子的随机连通图，权重在 1..=max_weight
///
/// 先连一条 0-1-...-(n-1) 的链保证连通，再随机加边（可能含自环）
pub fn random_graph(seed: u64, nodes: u32, extra_edges: usize, max_weight: u32) -> GraphStore<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = GraphStore::new();
    for id in 1..nodes {
        graph.insert_edge(id - 1, id, rng.gen_range(1..=max_weight));
    }
    for _ in 0..extra_edges {
        let a = rng.gen_range(0..nodes);
        let b = rng.gen_range(0..nodes);
        graph.insert_edge(a, b, rng.gen_range(1..=max_weight));
    }
    graph
}
