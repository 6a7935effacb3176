//! Route - 链表结构的路径表示
//!
//! 使用共享所有权实现前缀共享：扩展路径只创建一个新节点指向父路径，
//! 父路径本身永不修改。
//!
//! # 核心特性
//!
//! 1. **O(1)扩展**：`extend` 不复制已有节点
//! 2. **共享前缀**：同一父路径的所有扩展共享父路径内存
//! 3. **身份比较**：`same_as` 比较两个值是否为同一次构建的路径，
//!    结果账本用它判断队列中的路径是否已被淘汰
//! 4. **排名键**：`rank_cmp` 按 (代价, 节点数, 自末端起的节点序列) 比较，
//!    与线程调度无关；两条路径追加同一段后缀后先后关系不变
//! 5. **访问集合**：`start_tracked`/`extend_tracked` 构建的路径携带持久化节点集合，
//!    `visits` 的代价与路径长度无关
//!
//! 释放很长的路径时逐层解开父链，不会递归爆栈。

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::core::{Cost, NodeKey, Weight};

use super::visited::NodeSet;

/// 从搜索起点出发的一条路径（walk）及其累计代价
#[derive(Clone)]
pub struct Route<N: NodeKey> {
    link: Arc<Link<N>>,
}

struct Link<N: NodeKey> {
    /// 父路径（None表示起点）
    parent: Option<Route<N>>,
    /// 末端节点
    node: N,
    /// 累计代价
    cost: Cost,
    /// 节点数（缓存，避免递归计算）
    len: usize,
    /// 已访问节点的下标集合，仅跟踪模式下存在
    visited: Option<NodeSet>,
}

impl<N: NodeKey> Drop for Link<N> {
    fn drop(&mut self) {
        // 只有最后一个持有者负责释放父节点，逐层向起点推进
        let mut parent = self.parent.take();
        while let Some(route) = parent {
            parent = Arc::into_inner(route.link).and_then(|mut link| link.parent.take());
        }
    }
}

impl<N: NodeKey> Route<N> {
    /// 创建起点路径，代价为0
    pub fn start(node: N) -> Self {
        Self {
            link: Arc::new(Link {
                parent: None,
                node,
                cost: 0,
                len: 1,
                visited: None,
            }),
        }
    }

    /// 创建跟踪访问集合的起点路径，`id` 为起点在节点索引中的下标
    pub fn start_tracked(node: N, id: usize) -> Self {
        Self {
            link: Arc::new(Link {
                parent: None,
                node,
                cost: 0,
                len: 1,
                visited: Some(NodeSet::new().insert(id)),
            }),
        }
    }

    /// 沿一条边扩展路径，返回新路径
    pub fn extend(&self, node: N, weight: Weight) -> Self {
        self.extend_with(node, weight, None)
    }

    /// 扩展路径并把 `id` 加入访问集合；父路径不跟踪时与 `extend` 相同
    pub fn extend_tracked(&self, node: N, id: usize, weight: Weight) -> Self {
        let visited = self.link.visited.as_ref().map(|set| set.insert(id));
        self.extend_with(node, weight, visited)
    }

    fn extend_with(&self, node: N, weight: Weight, visited: Option<NodeSet>) -> Self {
        Self {
            link: Arc::new(Link {
                parent: Some(self.clone()),
                node,
                cost: self.link.cost + Cost::from(weight),
                len: self.link.len + 1,
                visited,
            }),
        }
    }

    /// 末端节点
    pub fn last(&self) -> &N {
        &self.link.node
    }

    /// 起点节点
    pub fn first(&self) -> &N {
        let mut current = self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current.last()
    }

    pub fn cost(&self) -> Cost {
        self.link.cost
    }

    /// 路径上的节点数，至少为1
    pub fn len(&self) -> usize {
        self.link.len
    }

    /// 边数
    pub fn hops(&self) -> usize {
        self.link.len - 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn parent(&self) -> Option<&Route<N>> {
        self.link.parent.as_ref()
    }

    /// 从末端向起点遍历节点
    pub fn iter_rev(&self) -> RevNodes<'_, N> {
        RevNodes {
            current: Some(self),
        }
    }

    /// 按起点到末端的顺序收集节点
    pub fn nodes(&self) -> Vec<N> {
        let mut nodes: Vec<N> = self.iter_rev().cloned().collect();
        nodes.reverse();
        nodes
    }

    pub fn contains(&self, node: &N) -> bool {
        self.iter_rev().any(|n| n == node)
    }

    /// 路径是否经过 `node`
    ///
    /// 路径跟踪访问集合且给出下标时查集合，否则退化为逐节点比较
    pub fn visits(&self, node: &N, id: Option<usize>) -> bool {
        match (&self.link.visited, id) {
            (Some(set), Some(id)) => set.contains(id),
            _ => self.contains(node),
        }
    }

    pub fn is_tracked(&self) -> bool {
        self.link.visited.is_some()
    }

    /// 按 (代价, 节点数, 自末端起的节点序列) 比较
    ///
    /// 只有节点序列完全相同的路径才相等
    pub fn rank_cmp(&self, other: &Route<N>) -> Ordering {
        self.cost()
            .cmp(&other.cost())
            .then_with(|| self.len().cmp(&other.len()))
            .then_with(|| self.iter_rev().cmp(other.iter_rev()))
    }

    /// 是否为同一次构建出的路径（指针相等）
    pub fn same_as(&self, other: &Route<N>) -> bool {
        Arc::ptr_eq(&self.link, &other.link)
    }
}

/// 反向节点迭代器
pub struct RevNodes<'a, N: NodeKey> {
    current: Option<&'a Route<N>>,
}

impl<'a, N: NodeKey> Iterator for RevNodes<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        let route = self.current?;
        self.current = route.parent();
        Some(route.last())
    }
}

/// 结构相等：代价与节点序列都相同
impl<N: NodeKey> PartialEq for Route<N> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
            || (self.cost() == other.cost()
                && self.len() == other.len()
                && self.iter_rev().eq(other.iter_rev()))
    }
}

impl<N: NodeKey> Eq for Route<N> {}

impl<N: NodeKey> fmt::Debug for Route<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("cost", &self.cost())
            .field("nodes", &self.nodes())
            .finish()
    }
}
