//! 搜索协调器
//!
//! 启动固定数量的工作线程，共享同一个前沿和账本。搜索开始前以终点为起点运行一次
//! Dijkstra，得到每个节点到终点的最短距离 h。前沿按 代价 + h 排序，这是经过该路径
//! 到达终点的代价下界。每个工作线程循环执行：
//!
//! 1. 从前沿取出下界最低的路径；前沿耗尽时退出
//! 2. walk 模式下路径已被账本淘汰则丢弃
//! 3. 终点已满且下界高于终点排名最后的记录时丢弃，不再扩展
//! 4. 沿每条边扩展，丢弃到不了终点或下界超出的候选
//!
//! `RouteMode::Walk` 下每个节点只保留排名最前的 K 条路径，准入成功的候选推入前沿。
//! 路径排名与调度无关，追加相同后缀不改变先后，因此结果恰为排名最前的 K 条 walk。
//!
//! `RouteMode::Simple`（默认）下扩展跳过路径上已有的节点，中间节点不设上限：
//! 候选直接推入前沿，只有到达终点的路径进入账本，到达终点的路径也不再扩展。
//! 无环路径有限，下界剪枝只丢弃不可能进入结果的前缀，因此结果恰为排名最前的 K 条
//! 无环路径。
//!
//! 终点账本中的路径即为结果，按 (代价, 节点数, 自末端起的节点序列) 升序排列。

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::core::{Cost, NodeKey};
use crate::graph::{DistanceTo, GraphStore, NO_EDGE};

use super::frontier::Frontier;
use super::ledger::{Admission, Ledger, LedgerKind};
use super::route::Route;
use super::stats::{SearchStats, StatsSnapshot};

/// 路径形态
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    /// 不重复经过节点
    #[default]
    Simple,
    /// 允许重复经过节点和边
    Walk,
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteMode::Simple => write!(f, "simple"),
            RouteMode::Walk => write!(f, "walk"),
        }
    }
}

/// 搜索选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// 工作线程数，0 表示使用 CPU 核数
    pub workers: usize,
    /// 账本实现
    pub ledger: LedgerKind,
    pub mode: RouteMode,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_ledger(mut self, ledger: LedgerKind) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn with_mode(mut self, mode: RouteMode) -> Self {
        self.mode = mode;
        self
    }

    /// 实际使用的工作线程数
    pub fn worker_count(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.workers
        }
    }
}

/// 搜索结果
#[derive(Debug, Clone)]
pub struct SearchOutcome<N: NodeKey> {
    /// 按代价升序排列的路径，最多 K 条
    pub routes: Vec<Route<N>>,
    pub stats: StatsSnapshot,
    pub elapsed: Duration,
}

impl<N: NodeKey> SearchOutcome<N> {
    fn empty() -> Self {
        Self {
            routes: Vec::new(),
            stats: StatsSnapshot::default(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn costs(&self) -> Vec<Cost> {
        self.routes.iter().map(|r| r.cost()).collect()
    }

    pub fn into_routes(self) -> Vec<Route<N>> {
        self.routes
    }
}

/// K 最短路径搜索
pub struct KShortestPaths<'g, N: NodeKey> {
    graph: &'g GraphStore<N>,
    options: SearchOptions,
}

impl<'g, N: NodeKey + 'static> KShortestPaths<'g, N> {
    pub fn new(graph: &'g GraphStore<N>) -> Self {
        Self {
            graph,
            options: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// 查找从 `source` 到 `destination` 的 K 条最低代价路径
    ///
    /// K 为 0 或起点、终点不在图中时返回空结果
    pub fn search(&self, source: &N, destination: &N, k: usize) -> SearchOutcome<N> {
        if k == 0 {
            debug!("k is 0, nothing to search");
            return SearchOutcome::empty();
        }
        let ledger = self.options.ledger.build::<N>(k);
        self.search_with_ledger(ledger.as_ref(), source, destination)
    }

    /// 使用调用方提供的账本搜索，K 取账本的上限
    ///
    /// 搜索结束后账本保留所有节点的记录，可供检查
    pub fn search_with_ledger(
        &self,
        ledger: &dyn Ledger<N>,
        source: &N,
        destination: &N,
    ) -> SearchOutcome<N> {
        let k = ledger.cap();
        if k == 0 {
            return SearchOutcome::empty();
        }
        if !self.graph.contains(source) || !self.graph.contains(destination) {
            debug!(
                "unknown endpoint in search {:?} -> {:?}, returning no routes",
                source, destination
            );
            return SearchOutcome::empty();
        }

        let started = Instant::now();
        let stats = SearchStats::new();
        let frontier = Frontier::new();
        let mode = self.options.mode;

        let remaining = self.graph.distances_to(destination);
        let Some(head) = remaining.get(source) else {
            debug!(
                "{:?} cannot reach {:?}, returning no routes",
                source, destination
            );
            return SearchOutcome {
                elapsed: started.elapsed(),
                ..SearchOutcome::empty()
            };
        };

        let origin = match (mode, remaining.index().index_of(source)) {
            (RouteMode::Simple, Some(id)) => Route::start_tracked(source.clone(), id),
            _ => Route::start(source.clone()),
        };
        // 无环模式下只有终点记录路径
        let recorded = if mode == RouteMode::Walk || source == destination {
            let admitted = ledger.try_admit(source, &origin).is_admitted();
            if admitted {
                stats.increment_admitted();
            }
            admitted
        } else {
            false
        };
        // 无环模式下起点即终点时不再扩展
        let expands = match mode {
            RouteMode::Walk => recorded,
            RouteMode::Simple => source != destination,
        };
        if expands {
            stats.increment_pushed();
            frontier.push_estimated(origin, head);
        }

        let worker_count = self.options.worker_count();
        let ctx = WorkerContext {
            graph: self.graph,
            frontier: &frontier,
            ledger,
            remaining: &remaining,
            destination,
            mode,
            stats: &stats,
        };

        thread::scope(|scope| {
            let mut spawned = 0;
            for id in 0..worker_count {
                let spawn = thread::Builder::new()
                    .name(format!("kpaths-worker-{}", id))
                    .spawn_scoped(scope, move || ctx.run(id));
                match spawn {
                    Ok(_) => spawned += 1,
                    Err(e) => warn!("failed to spawn search worker {}: {}", id, e),
                }
            }
            if spawned == 0 {
                warn!("no search worker could be spawned, searching on the calling thread");
                ctx.run(0);
            }
        });

        debug_assert!(frontier.is_drained(), "search finished before the frontier drained");

        let routes = ledger.routes_for(destination);
        let snapshot = stats.snapshot();
        let elapsed = started.elapsed();
        debug!(
            "search {:?} -> {:?} (k={}, workers={}, ledger={}, mode={}) found {} routes in {:?}: {:?}",
            source,
            destination,
            k,
            worker_count,
            self.options.ledger,
            self.options.mode,
            routes.len(),
            elapsed,
            snapshot
        );

        SearchOutcome {
            routes,
            stats: snapshot,
            elapsed,
        }
    }
}

/// 使用默认选项查找 K 最短路径
pub fn find_k_shortest_paths<N: NodeKey + 'static>(
    graph: &GraphStore<N>,
    source: &N,
    destination: &N,
    k: usize,
) -> Vec<Route<N>> {
    KShortestPaths::new(graph)
        .search(source, destination, k)
        .into_routes()
}

/// 工作线程共享的只读上下文
struct WorkerContext<'a, N: NodeKey> {
    graph: &'a GraphStore<N>,
    frontier: &'a Frontier<N>,
    ledger: &'a dyn Ledger<N>,
    /// 各节点到终点的最短距离
    remaining: &'a DistanceTo<N>,
    destination: &'a N,
    mode: RouteMode,
    stats: &'a SearchStats,
}

impl<N: NodeKey> Clone for WorkerContext<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: NodeKey> Copy for WorkerContext<'_, N> {}

impl<N: NodeKey> WorkerContext<'_, N> {
    fn run(self, id: usize) {
        trace!("search worker {} started", id);
        let mut processed = 0u64;
        while let Some(claim) = self.frontier.pop_cheapest() {
            processed += 1;
            self.stats.increment_popped();
            self.process(&claim);
        }
        trace!("search worker {} finished after {} routes", id, processed);
    }

    fn process(&self, route: &Route<N>) {
        let tail = route.last();
        // 无环模式下中间节点不记录，路径不会被淘汰
        if self.mode == RouteMode::Walk && !self.ledger.retains(tail, route) {
            self.stats.increment_superseded();
            return;
        }

        // 终点上界只会下降，整个扩展过程使用同一个读数
        let bound = self.ledger.bound(self.destination);
        let beyond = |estimate: Cost| bound.is_some_and(|b| estimate > b);
        let index = self.remaining.index();
        if beyond(self.estimate(route.cost(), index.index_of(tail))) {
            self.stats.increment_pruned();
            return;
        }

        self.stats.increment_expanded();
        for (neighbor, &weight) in self.graph.neighbors_of(tail) {
            let id = index.index_of(neighbor);
            if self.mode == RouteMode::Simple && route.visits(neighbor, id) {
                self.stats.increment_revisits();
                continue;
            }
            let estimate = self.estimate(route.cost() + Cost::from(weight), id);
            if estimate == NO_EDGE || beyond(estimate) {
                self.stats.increment_pruned();
                continue;
            }
            let candidate = match (self.mode, id) {
                (RouteMode::Simple, Some(id)) => route.extend_tracked(neighbor.clone(), id, weight),
                _ => route.extend(neighbor.clone(), weight),
            };

            match self.mode {
                RouteMode::Simple if neighbor != self.destination => {
                    self.enqueue(candidate, estimate);
                }
                // 到达终点的无环路径只进入账本
                RouteMode::Simple => {
                    self.record(neighbor, &candidate);
                }
                RouteMode::Walk => {
                    if self.record(neighbor, &candidate) {
                        self.enqueue(candidate, estimate);
                    }
                }
            }
        }
    }

    /// 代价加上到终点的最短距离，到不了终点时为 `NO_EDGE`
    fn estimate(&self, cost: Cost, id: Option<usize>) -> Cost {
        match id.map(|i| self.remaining.at(i)) {
            Some(rest) if rest != NO_EDGE => cost.saturating_add(rest),
            _ => NO_EDGE,
        }
    }

    /// 候选准入账本，返回是否被记录
    fn record(&self, node: &N, candidate: &Route<N>) -> bool {
        match self.ledger.try_admit(node, candidate) {
            Admission::Admitted => {
                self.stats.increment_admitted();
                true
            }
            Admission::Replaced(_) => {
                self.stats.increment_replaced();
                true
            }
            Admission::Rejected => {
                self.stats.increment_rejected();
                false
            }
        }
    }

    fn enqueue(&self, candidate: Route<N>, estimate: Cost) {
        self.stats.increment_pushed();
        self.frontier.push_estimated(candidate, estimate);
    }
}
