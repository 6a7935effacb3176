//! 结果输出
//!
//! 文本格式沿用 `Route 1: A -> B -> C -> end (cost 2)`，
//! JSON 格式包含排名、代价、节点序列与搜索统计

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::core::{Cost, KspResult, NodeKey};
use crate::graph::{DistanceMatrix, NO_EDGE};
use crate::search::{Route, SearchOutcome, StatsSnapshot};

/// 单条路径的输出视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteView {
    pub rank: usize,
    pub cost: Cost,
    pub nodes: Vec<String>,
}

/// 一次搜索的完整输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    pub source: String,
    pub destination: String,
    pub k: usize,
    pub routes: Vec<RouteView>,
    pub stats: StatsSnapshot,
    pub elapsed_ms: f64,
}

impl SearchReport {
    pub fn new<N: NodeKey + Display>(
        source: &N,
        destination: &N,
        k: usize,
        outcome: &SearchOutcome<N>,
    ) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
            k,
            routes: views(&outcome.routes),
            stats: outcome.stats,
            elapsed_ms: outcome.elapsed.as_secs_f64() * 1000.0,
        }
    }
}

fn views<N: NodeKey + Display>(routes: &[Route<N>]) -> Vec<RouteView> {
    routes
        .iter()
        .enumerate()
        .map(|(i, route)| RouteView {
            rank: i + 1,
            cost: route.cost(),
            nodes: route.nodes().iter().map(ToString::to_string).collect(),
        })
        .collect()
}

/// 每条路径一行
pub fn render_text<N: NodeKey + Display>(routes: &[Route<N>]) -> String {
    let mut out = String::new();
    for view in views(routes) {
        out.push_str(&format!("Route {}: ", view.rank));
        for node in &view.nodes {
            out.push_str(node);
            out.push_str(" -> ");
        }
        out.push_str(&format!("end (cost {})\n", view.cost));
    }
    out
}

pub fn render_json(report: &SearchReport) -> KspResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// 距离矩阵，首行为节点编号，不相邻记为 `inf`
pub fn render_matrix<N: NodeKey + Display>(matrix: &DistanceMatrix<N>) -> String {
    let mut out = String::new();
    for (i, node) in matrix.index().iter() {
        out.push_str(&format!("{}\t{}\n", i, node));
    }
    if matrix.size() == 0 {
        return out;
    }

    let header: Vec<String> = (0..matrix.size()).map(|i| i.to_string()).collect();
    out.push_str(&format!("\t{}\n", header.join("\t")));
    for (i, row) in matrix.rows().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .map(|&d| {
                if d == NO_EDGE {
                    "inf".to_string()
                } else {
                    d.to_string()
                }
            })
            .collect();
        out.push_str(&format!("{}\t{}\n", i, cells.join("\t")));
    }
    out
}
