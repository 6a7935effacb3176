//! CSV 边列表读取
//!
//! 每条记录形如 `源节点,目标节点,权重,...`，字段数必须等于
//! `InputConfig::expected_fields`。字段数不符、权重不是可放入 `u32` 的
//! 非负整数、或记录本身无法解析时，记录被跳过并记一条警告；
//! 底层 IO 错误直接返回。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{info, warn};
use thiserror::Error;

use crate::config::InputConfig;
use crate::core::{KspError, KspResult, Weight};
use crate::graph::GraphStore;

/// 一条边
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub weight: Weight,
}

impl EdgeRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: Weight) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }

    pub fn into_tuple(self) -> (String, String, Weight) {
        (self.source, self.target, self.weight)
    }
}

/// 记录被跳过的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid weight {0:?}")]
    InvalidWeight(String),

    #[error("malformed record: {0}")]
    Malformed(String),
}

/// 读取统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// 读到的记录数（不含表头）
    pub records: usize,
    pub accepted: usize,
    pub skipped: usize,
}

/// 从任意输入读取边列表
pub fn read_edges<R: Read>(
    reader: R,
    config: &InputConfig,
) -> KspResult<(Vec<EdgeRecord>, IngestReport)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .has_headers(config.has_headers)
        .flexible(true)
        .from_reader(reader);

    let mut edges = Vec::new();
    let mut report = IngestReport::default();

    for result in csv_reader.records() {
        report.records += 1;
        let parsed = match result {
            Ok(record) => {
                let line = record.position().map_or(0, |p| p.line());
                parse_record(&record, config).map_err(|reason| (line, reason))
            }
            Err(err) if err.is_io_error() => return Err(KspError::Csv(err)),
            Err(err) => {
                let line = err.position().map_or(0, |p| p.line());
                Err((line, SkipReason::Malformed(err.to_string())))
            }
        };
        match parsed {
            Ok(edge) => {
                report.accepted += 1;
                edges.push(edge);
            }
            Err((line, reason)) => {
                report.skipped += 1;
                warn!("skipping edge record at line {}: {}", line, reason);
            }
        }
    }

    Ok((edges, report))
}

/// 从文件读取边列表，文件无法打开时返回错误
pub fn read_edges_from_path<P: AsRef<Path>>(
    path: P,
    config: &InputConfig,
) -> KspResult<(Vec<EdgeRecord>, IngestReport)> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let (edges, report) = read_edges(file, config)?;
    info!(
        "read {} edges from {} ({} records, {} skipped)",
        report.accepted,
        path.display(),
        report.records,
        report.skipped
    );
    Ok((edges, report))
}

/// 读取文件并构建图
pub fn load_graph<P: AsRef<Path>>(
    path: P,
    config: &InputConfig,
) -> KspResult<(GraphStore<String>, IngestReport)> {
    let (edges, report) = read_edges_from_path(path, config)?;
    let graph = GraphStore::from_edges(edges.into_iter().map(EdgeRecord::into_tuple));
    info!(
        "graph has {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok((graph, report))
}

fn parse_record(record: &csv::StringRecord, config: &InputConfig) -> Result<EdgeRecord, SkipReason> {
    if record.len() != config.expected_fields {
        return Err(SkipReason::FieldCount {
            expected: config.expected_fields,
            found: record.len(),
        });
    }
    let field = |column: usize| record.get(column).unwrap_or_default();

    let raw_weight = field(config.weight_column);
    let weight = raw_weight
        .trim()
        .parse::<Weight>()
        .map_err(|_| SkipReason::InvalidWeight(raw_weight.to_string()))?;

    Ok(EdgeRecord::new(
        field(config.source_column),
        field(config.target_column),
        weight,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(data: &str, config: &InputConfig) -> (Vec<EdgeRecord>, IngestReport) {
        read_edges(data.as_bytes(), config).expect("in-memory read should not fail")
    }

    #[test]
    fn test_reads_four_field_records() {
        let data = "Rosa Parks,The Doctor,3,1\nThe Doctor,Gat,7,1\n";
        let (edges, report) = read(data, &InputConfig::default());
        assert_eq!(
            edges,
            vec![
                EdgeRecord::new("Rosa Parks", "The Doctor", 3),
                EdgeRecord::new("The Doctor", "Gat", 7),
            ]
        );
        assert_eq!(
            report,
            IngestReport {
                records: 2,
                accepted: 2,
                skipped: 0
            }
        );
    }

    #[test]
    fn test_skips_bad_records() {
        // 依次为：合法、字段不足、非数字、负数、溢出、带空格的合法权重
        let data = "A,B,1,x\nA,B,1\nA,C,heavy,x\nB,C,-2,x\nC,D,99999999999,x\nC,D, 4 ,x\n";
        let (edges, report) = read(data, &InputConfig::default());
        assert_eq!(
            edges,
            vec![EdgeRecord::new("A", "B", 1), EdgeRecord::new("C", "D", 4)]
        );
        assert_eq!(report.records, 6);
        assert_eq!(report.skipped, 4);
        assert_eq!(report.accepted + report.skipped, report.records);
    }

    #[test]
    fn test_header_and_delimiter() {
        let config = InputConfig {
            delimiter: ";".to_string(),
            has_headers: true,
            expected_fields: 3,
            ..InputConfig::default()
        };
        let (edges, report) = read("from;to;weight\nA;B;2\n", &config);
        assert_eq!(edges, vec![EdgeRecord::new("A", "B", 2)]);
        assert_eq!(report.records, 1);
    }

    #[test]
    fn test_custom_columns() {
        let config = InputConfig {
            expected_fields: 3,
            source_column: 1,
            target_column: 2,
            weight_column: 0,
            ..InputConfig::default()
        };
        let (edges, _) = read("5,A,B\n", &config);
        assert_eq!(edges, vec![EdgeRecord::new("A", "B", 5)]);
    }

    #[test]
    fn test_field_count_reason() {
        let record = csv::StringRecord::from(vec!["A", "B"]);
        let reason = parse_record(&record, &InputConfig::default())
            .expect_err("short record should be skipped");
        assert_eq!(
            reason,
            SkipReason::FieldCount {
                expected: 4,
                found: 2
            }
        );
    }

    #[test]
    fn test_bad_delimiter_is_an_error() {
        let config = InputConfig {
            delimiter: "tab".to_string(),
            ..InputConfig::default()
        };
        assert!(matches!(
            read_edges("A,B,1,x".as_bytes(), &config),
            Err(KspError::InvalidArgument(_))
        ));
    }
}
