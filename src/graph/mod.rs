//! 图存储模块
//!
//! 包含带权无向图的邻接存储、节点索引、直接距离矩阵，以及到目标节点的最短距离表

pub mod distance;
pub mod matrix;
pub mod store;

pub use distance::DistanceTo;
pub use matrix::{DistanceMatrix, NodeIndex, NO_EDGE};
pub use store::{GraphStore, Neighbors};
