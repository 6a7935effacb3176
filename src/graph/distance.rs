//! 到单个目标节点的最短距离表
//!
//! 以目标为起点运行一次 Dijkstra。图是无向的，所以得到的是每个节点到目标的
//! 最短距离。路径搜索把它作为剩余代价的下界：既用于前沿排序，也用于提前剪枝。

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::core::{Cost, NodeKey};

use super::matrix::{NodeIndex, NO_EDGE};
use super::store::GraphStore;

/// 优先队列条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    index: usize,
    distance: Cost,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 各节点到目标的最短距离，不可达为 `NO_EDGE`
#[derive(Debug, Clone)]
pub struct DistanceTo<N: NodeKey> {
    index: NodeIndex<N>,
    distances: Vec<Cost>,
}

impl<N: NodeKey> DistanceTo<N> {
    /// 计算图中每个节点到 `target` 的最短距离
    ///
    /// `target` 不在图中时所有节点均不可达
    pub fn build(graph: &GraphStore<N>, target: &N) -> Self {
        let index = graph.node_index();
        let mut distances = vec![NO_EDGE; index.len()];
        let mut heap = BinaryHeap::new();

        if let Some(start) = index.index_of(target) {
            distances[start] = 0;
            heap.push(Pending {
                index: start,
                distance: 0,
            });
        }

        while let Some(Pending { index: at, distance }) = heap.pop() {
            if distance > distances[at] {
                continue;
            }
            let Some(node) = index.node_at(at) else {
                continue;
            };
            for (neighbor, &weight) in graph.neighbors_of(node) {
                let Some(next) = index.index_of(neighbor) else {
                    continue;
                };
                let candidate = distance.saturating_add(Cost::from(weight));
                if candidate < distances[next] {
                    distances[next] = candidate;
                    heap.push(Pending {
                        index: next,
                        distance: candidate,
                    });
                }
            }
        }

        Self { index, distances }
    }

    pub fn index(&self) -> &NodeIndex<N> {
        &self.index
    }

    /// 按下标读取距离，不可达或越界时为 `NO_EDGE`
    pub fn at(&self, index: usize) -> Cost {
        self.distances.get(index).copied().unwrap_or(NO_EDGE)
    }

    /// 节点到目标的距离，不可达或节点未知时返回 `None`
    pub fn get(&self, node: &N) -> Option<Cost> {
        self.index
            .index_of(node)
            .map(|i| self.at(i))
            .filter(|&d| d != NO_EDGE)
    }
}
