//! 基础类型定义
//!
//! 节点标识、边权重与路径代价

use std::fmt::Debug;
use std::hash::Hash;

/// 边权重（非负整数）
pub type Weight = u32;

/// 路径累计代价
///
/// 使用比 `Weight` 更宽的类型，长路径累加不会溢出
pub type Cost = u64;

/// 节点标识
///
/// 不透明、可比较、可哈希的值。排序用于邻居的确定性遍历顺序和等价代价路径的排名。
pub trait NodeKey: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

impl<T> NodeKey for T where T: Clone + Eq + Hash + Ord + Debug + Send + Sync {}
