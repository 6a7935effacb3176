use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{KspError, KspResult};
use crate::search::{LedgerKind, RouteMode, SearchOptions};

/// 应用配置
///
/// 所有字段都有默认值，配置文件中缺省的段或字段取默认值
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub input: InputConfig,
    pub log: LogConfig,
}

/// 搜索参数
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub source: String,
    pub destination: String,
    /// 每个节点保留的路径数
    pub k: usize,
    /// 工作线程数，0 表示使用 CPU 核数
    pub workers: usize,
    pub ledger: LedgerKind,
    pub mode: RouteMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            source: "Rosa Parks".to_string(),
            destination: "Gat".to_string(),
            k: 10,
            workers: 0,
            ledger: LedgerKind::default(),
            mode: RouteMode::default(),
        }
    }
}

impl SearchConfig {
    pub fn options(&self) -> SearchOptions {
        SearchOptions::new()
            .with_workers(self.workers)
            .with_ledger(self.ledger)
            .with_mode(self.mode)
    }
}

/// 边列表输入
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    pub path: PathBuf,
    /// 单字节 ASCII 分隔符
    pub delimiter: String,
    pub has_headers: bool,
    /// 每条记录的字段数，字段数不同的记录被跳过
    pub expected_fields: usize,
    pub source_column: usize,
    pub target_column: usize,
    pub weight_column: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("doctorwho.csv"),
            delimiter: ",".to_string(),
            has_headers: false,
            expected_fields: 4,
            source_column: 0,
            target_column: 1,
            weight_column: 2,
        }
    }
}

impl InputConfig {
    /// 分隔符字节，调用前应已通过 `Config::validate`
    pub fn delimiter_byte(&self) -> KspResult<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(KspError::invalid_argument(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            ))),
        }
    }
}

/// 日志配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
    pub file: String,
    pub max_file_size: u64,
    pub max_files: usize,
    /// false 时输出到 stderr
    pub to_file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "logs".to_string(),
            file: "kpaths".to_string(),
            max_file_size: 10 * 1024 * 1024, // 10MB
            max_files: 5,
            to_file: false,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> KspResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 文件存在时加载，否则使用默认配置
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> KspResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> KspResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> KspResult<()> {
        if self.search.source.is_empty() {
            return Err(KspError::invalid_argument("search.source must not be empty"));
        }
        if self.search.destination.is_empty() {
            return Err(KspError::invalid_argument(
                "search.destination must not be empty",
            ));
        }
        self.input.delimiter_byte()?;

        let input = &self.input;
        if input.expected_fields < 3 {
            return Err(KspError::invalid_argument(format!(
                "input.expected_fields must be at least 3, got {}",
                input.expected_fields
            )));
        }
        for (name, column) in [
            ("source_column", input.source_column),
            ("target_column", input.target_column),
            ("weight_column", input.weight_column),
        ] {
            if column >= input.expected_fields {
                return Err(KspError::invalid_argument(format!(
                    "input.{} ({}) out of range for {} fields",
                    name, column, input.expected_fields
                )));
            }
        }
        Ok(())
    }
}
