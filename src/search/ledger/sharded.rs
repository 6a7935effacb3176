//! 按节点分片加锁的账本
//!
//! 每个节点的槽位位于 DashMap 的某个分片中，准入只锁住该分片。
//! 不同节点的准入大多互不阻塞。

use dashmap::DashMap;

use crate::core::{Cost, NodeKey};
use crate::search::route::Route;

use super::slot::Slot;
use super::{Admission, Ledger};

pub struct ShardedLedger<N: NodeKey> {
    cap: usize,
    slots: DashMap<N, Slot<N>>,
}

impl<N: NodeKey> ShardedLedger<N> {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            slots: DashMap::new(),
        }
    }

    /// 已记录过路径的节点数
    pub fn node_count(&self) -> usize {
        self.slots.len()
    }
}

impl<N: NodeKey> Ledger<N> for ShardedLedger<N> {
    fn cap(&self) -> usize {
        self.cap
    }

    fn try_admit(&self, node: &N, route: &Route<N>) -> Admission<N> {
        debug_assert!(route.last() == node, "route does not end at {:?}", node);
        if let Some(mut slot) = self.slots.get_mut(node) {
            return slot.admit(self.cap, route);
        }
        self.slots
            .entry(node.clone())
            .or_default()
            .admit(self.cap, route)
    }

    fn retains(&self, node: &N, route: &Route<N>) -> bool {
        self.slots
            .get(node)
            .is_some_and(|slot| slot.retains(route))
    }

    fn bound(&self, node: &N) -> Option<Cost> {
        self.slots.get(node).and_then(|slot| slot.bound(self.cap))
    }

    fn routes_for(&self, node: &N) -> Vec<Route<N>> {
        self.slots
            .get(node)
            .map(|slot| slot.ranked())
            .unwrap_or_default()
    }

    fn admitted(&self, node: &N) -> usize {
        self.slots.get(node).map_or(0, |slot| slot.len())
    }
}
