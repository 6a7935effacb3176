//! 单个节点的准入槽位
//!
//! 两种账本实现共享的逻辑：调用方负责在同一把锁内完成检查与写入

use std::cmp::Ordering;

use crate::core::{Cost, NodeKey};
use crate::search::route::Route;

use super::Admission;

struct Recorded<N: NodeKey> {
    /// 节点内的准入序号
    seq: u64,
    route: Route<N>,
}

/// 节点已记录的路径，最多 cap 条
pub(crate) struct Slot<N: NodeKey> {
    entries: Vec<Recorded<N>>,
    next_seq: u64,
}

impl<N: NodeKey> Default for Slot<N> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<N: NodeKey> Slot<N> {
    /// 检查并记录候选路径
    ///
    /// 未满时直接记录；已满时只有排名严格靠前的候选才能淘汰排名最后的一条
    pub(crate) fn admit(&mut self, cap: usize, route: &Route<N>) -> Admission<N> {
        let admission = if self.entries.len() < cap {
            self.record(route);
            Admission::Admitted
        } else {
            match self.worst() {
                Some(worst) if route.rank_cmp(&self.entries[worst].route) == Ordering::Less => {
                    let evicted = self.entries.swap_remove(worst).route;
                    self.record(route);
                    Admission::Replaced(evicted)
                }
                _ => Admission::Rejected,
            }
        };
        debug_assert!(
            self.entries.len() <= cap,
            "slot holds {} routes, cap is {}",
            self.entries.len(),
            cap
        );
        admission
    }

    fn record(&mut self, route: &Route<N>) {
        self.entries.push(Recorded {
            seq: self.next_seq,
            route: route.clone(),
        });
        self.next_seq += 1;
    }

    /// 排名最后的一条；节点序列相同时取最后准入的
    fn worst(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| Self::order(a, b))
            .map(|(i, _)| i)
    }

    fn order(a: &Recorded<N>, b: &Recorded<N>) -> Ordering {
        a.route.rank_cmp(&b.route).then_with(|| a.seq.cmp(&b.seq))
    }

    pub(crate) fn retains(&self, route: &Route<N>) -> bool {
        self.entries.iter().any(|r| r.route.same_as(route))
    }

    pub(crate) fn bound(&self, cap: usize) -> Option<Cost> {
        if cap == 0 || self.entries.len() < cap {
            return None;
        }
        self.worst().map(|i| self.entries[i].route.cost())
    }

    /// 按排名排序的路径
    pub(crate) fn ranked(&self) -> Vec<Route<N>> {
        let mut entries: Vec<&Recorded<N>> = self.entries.iter().collect();
        entries.sort_by(|a, b| Self::order(a, b));
        entries.into_iter().map(|r| r.route.clone()).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
