//! 边定义

use crate::graph::vertex::VertexId;
use serde::{Deserialize, Serialize};

/// 带权边
///
/// 无向图中 `src`/`dst` 只是规范化后的端点顺序，不表示方向。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// 源顶点 ID
    src: VertexId,
    /// 目标顶点 ID
    dst: VertexId,
    /// 权重
    weight: f64,
}

impl Edge {
    /// 创建新边
    pub fn new(src: VertexId, dst: VertexId, weight: f64) -> Self {
        Self { src, dst, weight }
    }

    /// 获取源顶点 ID
    pub fn src(&self) -> VertexId {
        self.src
    }

    /// 获取目标顶点 ID
    pub fn dst(&self) -> VertexId {
        self.dst
    }

    /// 获取权重
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// 两个端点
    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.src, self.dst)
    }
}
