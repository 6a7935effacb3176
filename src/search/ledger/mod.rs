//! 结果账本
//!
//! 为每个节点记录最多 K 条以该节点结尾的路径。准入是按节点原子的
//! "检查并写入"：两个线程同时争夺第 K 和第 K+1 个名额时不会都成功。
//!
//! 记录按 `Route::rank_cmp` 排名，即 (代价, 节点数, 自末端起的节点序列)。
//! 节点已满时，排名严格靠前的候选会淘汰该节点排名最后的一条记录，因此账本最终
//! 保存的是每个节点排名最前的 K 条路径，与线程调度无关。被淘汰的路径如果还在
//! 前沿中，出队时 `retains` 返回 false，不再扩展。

mod global;
mod sharded;
mod slot;

pub use global::GlobalLedger;
pub use sharded::ShardedLedger;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{Cost, NodeKey};

use super::route::Route;

/// 准入结果
#[derive(Debug, Clone)]
pub enum Admission<N: NodeKey> {
    /// 节点未满，直接记录
    Admitted,
    /// 节点已满，淘汰了给出的旧路径
    Replaced(Route<N>),
    /// 未记录，候选被丢弃
    Rejected,
}

impl<N: NodeKey> Admission<N> {
    pub fn is_admitted(&self) -> bool {
        !matches!(self, Admission::Rejected)
    }
}

/// 结果账本接口
pub trait Ledger<N: NodeKey>: Send + Sync {
    /// 每个节点的上限 K
    fn cap(&self) -> usize;

    /// 原子地检查并记录以 `node` 结尾的路径
    fn try_admit(&self, node: &N, route: &Route<N>) -> Admission<N>;

    /// 路径是否仍被记录（未被淘汰）
    fn retains(&self, node: &N, route: &Route<N>) -> bool;

    /// 节点已满时，排名最后一条记录的代价
    fn bound(&self, node: &N) -> Option<Cost>;

    /// 节点当前记录的路径，按排名升序
    fn routes_for(&self, node: &N) -> Vec<Route<N>>;

    /// 节点当前记录的路径数
    fn admitted(&self, node: &N) -> usize;
}

/// 账本实现选择
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    /// 按节点分片加锁
    #[default]
    Sharded,
    /// 单全局锁
    Global,
}

impl LedgerKind {
    pub fn build<N: NodeKey + 'static>(self, cap: usize) -> Box<dyn Ledger<N>> {
        match self {
            LedgerKind::Sharded => Box::new(ShardedLedger::new(cap)),
            LedgerKind::Global => Box::new(GlobalLedger::new(cap)),
        }
    }
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerKind::Sharded => write!(f, "sharded"),
            LedgerKind::Global => write!(f, "global"),
        }
    }
}

impl FromStr for LedgerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sharded" => Ok(LedgerKind::Sharded),
            "global" => Ok(LedgerKind::Global),
            other => Err(format!("unknown ledger kind: {}", other)),
        }
    }
}
