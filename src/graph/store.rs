//! 邻接存储
//!
//! 节点到 (邻居 -> 权重) 的映射。插入是对称的，同一对节点的后一次插入覆盖
//! 前一次的权重（两个方向同时覆盖，不累加）。
//!
//! 图只在搜索开始前顺序构建；搜索期间以 `&GraphStore` 共享，只读。

use std::collections::{BTreeMap, HashMap};

use crate::core::{NodeKey, Weight};

use super::distance::DistanceTo;
use super::matrix::{DistanceMatrix, NodeIndex};

/// 邻居集合：邻居 -> 边权重
///
/// 按节点排序遍历，保证扩展顺序确定
pub type Neighbors<N> = BTreeMap<N, Weight>;

/// 带权无向图
#[derive(Debug, Clone)]
pub struct GraphStore<N: NodeKey> {
    connections: HashMap<N, Neighbors<N>>,
    /// 节点首次出现的顺序
    order: Vec<N>,
    empty: Neighbors<N>,
}

impl<N: NodeKey> Default for GraphStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> GraphStore<N> {
    pub fn new() -> Self {
        Self {
            connections: HashMap::new(),
            order: Vec::new(),
            empty: Neighbors::new(),
        }
    }

    /// 从边列表构建图
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N, Weight)>,
    {
        let mut graph = Self::new();
        graph.extend_edges(edges);
        graph
    }

    /// 批量插入边
    pub fn extend_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (N, N, Weight)>,
    {
        for (a, b, weight) in edges {
            self.insert_edge(a, b, weight);
        }
    }

    /// 插入或更新一条对称边
    pub fn insert_edge(&mut self, a: N, b: N, weight: Weight) {
        self.neighbors_mut(&a).insert(b.clone(), weight);
        self.neighbors_mut(&b).insert(a, weight);
    }

    fn neighbors_mut(&mut self, node: &N) -> &mut Neighbors<N> {
        let order = &mut self.order;
        self.connections.entry(node.clone()).or_insert_with(|| {
            order.push(node.clone());
            Neighbors::new()
        })
    }

    /// 获取节点的邻居；未知节点返回空集合
    pub fn neighbors_of(&self, node: &N) -> &Neighbors<N> {
        self.connections.get(node).unwrap_or(&self.empty)
    }

    /// 获取两个节点之间直接边的权重
    pub fn weight(&self, a: &N, b: &N) -> Option<Weight> {
        self.connections.get(a).and_then(|n| n.get(b)).copied()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.connections.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// 无向边数量，自环计一次
    pub fn edge_count(&self) -> usize {
        let mut entries = 0;
        let mut loops = 0;
        for (node, neighbors) in &self.connections {
            entries += neighbors.len();
            if neighbors.contains_key(node) {
                loops += 1;
            }
        }
        (entries + loops) / 2
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 按首次出现顺序遍历节点
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.order.iter()
    }

    /// 构建节点到矩阵下标的双射
    pub fn node_index(&self) -> NodeIndex<N> {
        NodeIndex::from_order(self.order.iter().cloned())
    }

    /// 构建直接距离矩阵
    ///
    /// 仅用于信息输出，路径搜索不使用该矩阵
    pub fn build_distance_matrix(&self) -> DistanceMatrix<N> {
        DistanceMatrix::build(self)
    }

    /// 计算每个节点到 `target` 的最短距离
    pub fn distances_to(&self, target: &N) -> DistanceTo<N> {
        DistanceTo::build(self, target)
    }
}

impl<N: NodeKey> FromIterator<(N, N, Weight)> for GraphStore<N> {
    fn from_iter<I: IntoIterator<Item = (N, N, Weight)>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}
