//! 搜索前沿
//!
//! 由互斥锁保护的二叉最小堆，按 `(优先级, 插入序号)` 排序。优先级默认是路径代价；
//! `push_estimated` 可以给出 代价 + 剩余代价下界，此时前沿按 A* 的顺序出队。
//! 插入序号在同一把锁内分配，因此优先级相同的路径按入队顺序出队。
//!
//! `pop_cheapest` 在一个临界区内完成"取出最便宜的路径并登记为处理中"或
//! "确认队列为空且无处理中的路径并置为耗尽"，两者之间没有竞态窗口。
//! 处理中的路径由 `Claim` 表示，`Claim` 被释放时处理中计数减一；计数归零且
//! 堆为空时前沿耗尽，所有等待者被唤醒并退出。

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::ops::Deref;

use crossbeam_utils::atomic::AtomicCell;
use parking_lot::{Condvar, Mutex, MutexGuard};

use crate::core::{Cost, NodeKey};

use super::route::Route;

/// 堆条目
struct Entry<N: NodeKey> {
    priority: Cost,
    seq: u64,
    route: Route<N>,
}

impl<N: NodeKey> PartialEq for Entry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<N: NodeKey> Eq for Entry<N> {}

impl<N: NodeKey> Ord for Entry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // 反转比较，BinaryHeap 成为最小堆
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<N: NodeKey> PartialOrd for Entry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct State<N: NodeKey> {
    heap: BinaryHeap<Entry<N>>,
    next_seq: u64,
    /// 已出队但尚未处理完的路径数
    in_flight: usize,
    drained: bool,
}

/// 线程安全的优先级有序路径集合
pub struct Frontier<N: NodeKey> {
    state: Mutex<State<N>>,
    available: Condvar,
    drained: AtomicCell<bool>,
}

impl<N: NodeKey> Default for Frontier<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> Frontier<N> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                heap: BinaryHeap::new(),
                next_seq: 0,
                in_flight: 0,
                drained: false,
            }),
            available: Condvar::new(),
            drained: AtomicCell::new(false),
        }
    }

    /// 以一条路径作为初始内容创建前沿
    pub fn seeded(route: Route<N>) -> Self {
        let frontier = Self::new();
        frontier.push(route);
        frontier
    }

    /// 插入候选路径，按代价排序
    pub fn push(&self, route: Route<N>) {
        let priority = route.cost();
        self.push_estimated(route, priority);
    }

    /// 插入候选路径，按 `estimate` 排序
    ///
    /// `estimate` 应为经过该路径到达终点的代价下界，不低于路径自身代价
    pub fn push_estimated(&self, route: Route<N>, estimate: Cost) {
        debug_assert!(estimate >= route.cost(), "estimate below route cost");
        let mut state = self.state.lock();
        debug_assert!(!state.drained, "push into a drained frontier");
        let seq = state.next_seq;
        state.next_seq += 1;
        state.heap.push(Entry {
            priority: estimate,
            seq,
            route,
        });
        drop(state);
        self.available.notify_one();
    }

    /// 取出优先级最高（估计值最低）的路径
    ///
    /// 堆为空但仍有处理中的路径时阻塞等待（它们可能产生新路径）。
    /// 只有在前沿耗尽时返回 `None`。
    pub fn pop_cheapest(&self) -> Option<Claim<'_, N>> {
        let mut state = self.state.lock();
        loop {
            if let Some(entry) = state.heap.pop() {
                state.in_flight += 1;
                return Some(Claim {
                    frontier: self,
                    route: entry.route,
                });
            }
            if state.in_flight == 0 {
                self.mark_drained(&mut state);
                return None;
            }
            self.available.wait(&mut state);
        }
    }

    /// 非阻塞版本：堆为空时立即返回 `None`
    pub fn try_pop(&self) -> Option<Claim<'_, N>> {
        let mut state = self.state.lock();
        match state.heap.pop() {
            Some(entry) => {
                state.in_flight += 1;
                Some(Claim {
                    frontier: self,
                    route: entry.route,
                })
            }
            None => {
                if state.in_flight == 0 {
                    self.mark_drained(&mut state);
                }
                None
            }
        }
    }

    fn release(&self) {
        let mut state = self.state.lock();
        debug_assert!(state.in_flight > 0, "claim released twice");
        state.in_flight -= 1;
        if state.in_flight == 0 && state.heap.is_empty() {
            self.mark_drained(&mut state);
        }
    }

    fn mark_drained(&self, state: &mut MutexGuard<'_, State<N>>) {
        if !state.drained {
            state.drained = true;
            self.drained.store(true);
            self.available.notify_all();
        }
    }

    /// 队列中等待扩展的路径数（不含处理中的路径）
    pub fn len(&self) -> usize {
        self.state.lock().heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().heap.is_empty()
    }

    pub fn in_flight(&self) -> usize {
        self.state.lock().in_flight
    }

    /// 前沿是否已耗尽（堆为空且没有处理中的路径）
    pub fn is_drained(&self) -> bool {
        self.drained.load()
    }
}

/// 处理中的路径
///
/// 持有者扩展完路径并推入所有后继后释放；释放即完成一个处理单元
pub struct Claim<'a, N: NodeKey> {
    frontier: &'a Frontier<N>,
    route: Route<N>,
}

impl<N: NodeKey> Deref for Claim<'_, N> {
    type Target = Route<N>;

    fn deref(&self) -> &Self::Target {
        &self.route
    }
}

impl<N: NodeKey> Drop for Claim<'_, N> {
    fn drop(&mut self) {
        self.frontier.release();
    }
}
