//! 并发 K 最短路径搜索
//!
//! - `route`: 前缀共享的不可变路径
//! - `frontier`: 按代价下界排序的共享前沿
//! - `ledger`: 每节点最多 K 条路径的结果账本
//! - `visited`: 无环模式下路径携带的持久化节点集合
//! - `coordinator`: 工作线程池与搜索主循环
//! - `stats`: 搜索计数器

pub mod coordinator;
pub mod frontier;
pub mod ledger;
pub mod route;
pub mod stats;
mod visited;

pub use coordinator::{
    find_k_shortest_paths, KShortestPaths, RouteMode, SearchOptions, SearchOutcome,
};
pub use frontier::{Claim, Frontier};
pub use ledger::{Admission, GlobalLedger, Ledger, LedgerKind, ShardedLedger};
pub use route::Route;
pub use stats::{SearchStats, StatsSnapshot};
