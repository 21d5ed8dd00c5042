//! 通用类型定义

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

/// 最短路中不可达顶点的距离
pub const UNREACHABLE: f64 = f64::INFINITY;

/// 预算内没有可行路径时的瓶颈值
pub const NO_PATH: f64 = f64::NEG_INFINITY;

/// 顶点键的约束
///
/// 键只用于查找和确定性的排序，顶点的身份由 [`VertexId`](crate::graph::VertexId) 决定。
pub trait VertexKey: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> VertexKey for T {}

/// 图的方向性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphKind {
    /// 无向图，边对称存储，权重必须为正
    Undirected,
    /// 有向图，只存储给定方向，权重可以为零
    Directed,
}

impl GraphKind {
    /// 检查权重是否满足该类图的约束
    pub fn accepts(&self, weight: f64) -> bool {
        match self {
            GraphKind::Undirected => weight.is_finite() && weight > 0.0,
            GraphKind::Directed => weight.is_finite() && weight >= 0.0,
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphKind::Undirected => write!(f, "无向图"),
            GraphKind::Directed => write!(f, "有向图"),
        }
    }
}

/// 可全序比较的距离，用作优先队列的优先级
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance(pub f64);

impl Eq for Distance {}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
