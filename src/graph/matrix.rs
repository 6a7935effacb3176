//! 节点索引与直接距离矩阵
//!
//! `NodeIndex` 是节点到 0 基下标的显式双射，按图中节点首次出现的顺序一次性构建。
//! `DistanceMatrix` 是基于该索引的稠密 N×N 表：直接相连的节点存边权重，
//! 不相邻的节点存 `NO_EDGE`，对角线为 0。

use std::collections::HashMap;

use rayon::prelude::*;

use crate::core::{Cost, NodeKey};

use super::store::GraphStore;

/// 无直接边的哨兵值
///
/// 权重为 `u32`，矩阵单元为 `u64`，因此该值不会与任何真实权重冲突
pub const NO_EDGE: Cost = Cost::MAX;

/// 节点 <-> 下标 双射
#[derive(Debug, Clone)]
pub struct NodeIndex<N: NodeKey> {
    nodes: Vec<N>,
    positions: HashMap<N, usize>,
}

impl<N: NodeKey> NodeIndex<N> {
    /// 按给定顺序分配下标，重复节点保留第一次出现的位置
    pub fn from_order<I>(order: I) -> Self
    where
        I: IntoIterator<Item = N>,
    {
        let mut nodes = Vec::new();
        let mut positions = HashMap::new();
        for node in order {
            if !positions.contains_key(&node) {
                positions.insert(node.clone(), nodes.len());
                nodes.push(node);
            }
        }
        Self { nodes, positions }
    }

    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.positions.get(node).copied()
    }

    pub fn node_at(&self, index: usize) -> Option<&N> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 按下标顺序遍历节点
    pub fn iter(&self) -> impl Iterator<Item = (usize, &N)> {
        self.nodes.iter().enumerate()
    }
}

/// 直接距离矩阵（只读快照）
#[derive(Debug, Clone)]
pub struct DistanceMatrix<N: NodeKey> {
    index: NodeIndex<N>,
    /// 行优先存储
    cells: Vec<Cost>,
}

impl<N: NodeKey> DistanceMatrix<N> {
    /// 从图构建矩阵，各行并行填充
    pub fn build(graph: &GraphStore<N>) -> Self {
        let index = graph.node_index();
        let n = index.len();
        let mut cells = vec![NO_EDGE; n * n];

        if n > 0 {
            cells.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
                if let Some(node) = index.node_at(i) {
                    for (neighbor, weight) in graph.neighbors_of(node) {
                        if let Some(j) = index.index_of(neighbor) {
                            row[j] = Cost::from(*weight);
                        }
                    }
                }
                // 自环也不覆盖对角线
                row[i] = 0;
            });
        }

        Self { index, cells }
    }

    /// 矩阵边长
    pub fn size(&self) -> usize {
        self.index.len()
    }

    pub fn index(&self) -> &NodeIndex<N> {
        &self.index
    }

    /// 原始单元值，可能为 `NO_EDGE`
    ///
    /// # Panics
    /// 下标越界时 panic
    pub fn get(&self, i: usize, j: usize) -> Cost {
        let n = self.size();
        assert!(i < n && j < n, "matrix index ({i}, {j}) out of bounds for size {n}");
        self.cells[i * n + j]
    }

    pub fn row(&self, i: usize) -> &[Cost] {
        let n = self.size();
        &self.cells[i * n..(i + 1) * n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cost]> {
        // chunks(0) 会 panic，空矩阵单独处理
        let n = self.size().max(1);
        self.cells.chunks(n)
    }

    /// 按节点查询直接距离；未知节点或不相邻时返回 None
    pub fn distance(&self, a: &N, b: &N) -> Option<Cost> {
        let i = self.index.index_of(a)?;
        let j = self.index.index_of(b)?;
        match self.get(i, j) {
            NO_EDGE => None,
            d => Some(d),
        }
    }
}
