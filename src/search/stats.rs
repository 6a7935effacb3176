//! 搜索统计信息
//!
//! 所有计数器使用 Relaxed 原子操作，按缓存行填充，避免工作线程之间的伪共享

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_utils::CachePadded;
use serde::{Deserialize, Serialize};

/// 工作线程共享的计数器
#[derive(Debug, Default)]
pub struct SearchStats {
    /// 出队次数
    popped: CachePadded<AtomicU64>,
    /// 实际扩展的路径数
    expanded: CachePadded<AtomicU64>,
    /// 出队时已被更便宜路径淘汰的路径数
    superseded: CachePadded<AtomicU64>,
    /// 因不可能改进终点结果而丢弃的路径数
    pruned: CachePadded<AtomicU64>,
    /// 直接准入的候选路径数
    admitted: CachePadded<AtomicU64>,
    /// 淘汰旧路径后准入的候选路径数
    replaced: CachePadded<AtomicU64>,
    /// 被拒绝的候选路径数
    rejected: CachePadded<AtomicU64>,
    /// 无环模式下因重复节点跳过的邻居数
    revisits: CachePadded<AtomicU64>,
    /// 进入前沿的路径数
    pushed: CachePadded<AtomicU64>,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_popped(&self) {
        self.popped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_expanded(&self) {
        self.expanded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_superseded(&self) {
        self.superseded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_pruned(&self) {
        self.pruned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_admitted(&self) {
        self.admitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_replaced(&self) {
        self.replaced.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_revisits(&self) {
        self.revisits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_pushed(&self) {
        self.pushed.fetch_add(1, Ordering::Relaxed);
    }

    /// 读取当前计数
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            popped: self.popped.load(Ordering::Relaxed),
            expanded: self.expanded.load(Ordering::Relaxed),
            superseded: self.superseded.load(Ordering::Relaxed),
            pruned: self.pruned.load(Ordering::Relaxed),
            admitted: self.admitted.load(Ordering::Relaxed),
            replaced: self.replaced.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            revisits: self.revisits.load(Ordering::Relaxed),
            pushed: self.pushed.load(Ordering::Relaxed),
        }
    }
}

/// 统计快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub popped: u64,
    pub expanded: u64,
    pub superseded: u64,
    pub pruned: u64,
    pub admitted: u64,
    pub replaced: u64,
    pub rejected: u64,
    pub revisits: u64,
    pub pushed: u64,
}

impl StatsSnapshot {
    /// 进入账本的候选总数
    pub fn recorded(&self) -> u64 {
        self.admitted + self.replaced
    }
}
