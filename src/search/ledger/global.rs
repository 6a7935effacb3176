//! 单全局锁账本
//!
//! 所有节点的槽位放在一把 `parking_lot::Mutex` 下。实现简单，用作分片账本的
//! 对照基准（见 benches/ledger.rs）。

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::core::{Cost, NodeKey};
use crate::search::route::Route;

use super::slot::Slot;
use super::{Admission, Ledger};

pub struct GlobalLedger<N: NodeKey> {
    cap: usize,
    slots: Mutex<HashMap<N, Slot<N>>>,
}

impl<N: NodeKey> GlobalLedger<N> {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<N: NodeKey> Ledger<N> for GlobalLedger<N> {
    fn cap(&self) -> usize {
        self.cap
    }

    fn try_admit(&self, node: &N, route: &Route<N>) -> Admission<N> {
        debug_assert!(route.last() == node, "route does not end at {:?}", node);
        let mut slots = self.slots.lock();
        slots
            .entry(node.clone())
            .or_default()
            .admit(self.cap, route)
    }

    fn retains(&self, node: &N, route: &Route<N>) -> bool {
        self.slots
            .lock()
            .get(node)
            .is_some_and(|slot| slot.retains(route))
    }

    fn bound(&self, node: &N) -> Option<Cost> {
        self.slots
            .lock()
            .get(node)
            .and_then(|slot| slot.bound(self.cap))
    }

    fn routes_for(&self, node: &N) -> Vec<Route<N>> {
        self.slots
            .lock()
            .get(node)
            .map(|slot| slot.ranked())
            .unwrap_or_default()
    }

    fn admitted(&self, node: &N) -> usize {
        self.slots.lock().get(node).map_or(0, |slot| slot.len())
    }
}
