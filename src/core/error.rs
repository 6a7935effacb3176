//! 统一错误处理系统 for KPaths
//!
//! ## 设计理念
//!
//! 1. **核心不报错**：路径搜索本身不返回错误，未知节点或 K=0 时返回空结果；
//!    内部并发不变量被破坏属于编程错误，由 `debug_assert!` 捕获
//! 2. **外围统一**：配置、日志、CSV 读取等外围操作使用 `KspError`，
//!    外部错误通过 `#[from]` 自动转换
//! 3. **统一接口**：`KspResult<T>` 提供统一的返回类型，简化错误传播

use thiserror::Error;

/// 统一的错误类型
#[derive(Error, Debug)]
pub enum KspError {
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV错误: {0}")]
    Csv(#[from] csv::Error),

    #[error("配置解析错误: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("配置序列化错误: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("日志初始化错误: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("无效参数: {0}")]
    InvalidArgument(String),
}

/// 统一的结果类型
pub type KspResult<T> = Result<T, KspError>;

impl KspError {
    /// 构造无效参数错误
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        KspError::InvalidArgument(msg.into())
    }
}
