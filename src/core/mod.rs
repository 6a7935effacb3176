//! 核心模块
//!
//! 包含统一错误类型和搜索使用的基础类型定义

pub mod error;
pub mod types;

// 错误和结果类型
pub use error::{KspError, KspResult};

// 核心数据类型
pub use types::{Cost, NodeKey, Weight};
