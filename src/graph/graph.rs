//! 带权图数据结构
//!
//! 顶点按首次引用的顺序编号，邻接表按邻居首次插入的顺序遍历，
//! 所以同样的构造序列总能得到同样的遍历结果。

use super::edge::Edge;
use super::index::VertexIndex;
use super::vertex::VertexId;
use crate::error::{Error, Result};
use crate::types::{GraphKind, VertexKey};
use indexmap::IndexMap;
use std::collections::HashMap;

/// 邻接表：邻居 -> 权重
pub type Adjacency = IndexMap<VertexId, f64>;

/// 带权图
#[derive(Debug, Clone)]
pub struct WeightedGraph<K> {
    /// 有向或无向
    kind: GraphKind,
    /// 顶点索引
    index: VertexIndex<K>,
    /// 每个顶点的出边（无向图中两个方向都存）
    adjacency: Vec<Adjacency>,
}

impl<K: VertexKey> WeightedGraph<K> {
    /// 创建空图
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            index: VertexIndex::new(),
            adjacency: Vec::new(),
        }
    }

    /// 创建空的无向图
    pub fn undirected() -> Self {
        Self::new(GraphKind::Undirected)
    }

    /// 创建空的有向图
    pub fn directed() -> Self {
        Self::new(GraphKind::Directed)
    }

    /// 批量构造
    pub fn from_edges<I>(kind: GraphKind, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, K, f64)>,
    {
        let mut graph = Self::new(kind);
        for (a, b, weight) in edges {
            graph.edge(a, b, weight)?;
        }
        Ok(graph)
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Directed
    }

    // ==================== 顶点操作 ====================

    /// 获取或创建键对应的顶点
    pub fn node(&mut self, key: K) -> VertexId {
        let (id, inserted) = self.index.get_or_insert(key);
        if inserted {
            self.adjacency.push(Adjacency::new());
        }
        id
    }

    /// 通过键查找顶点
    pub fn vertex(&self, key: &K) -> Result<VertexId> {
        self.index
            .get(key)
            .ok_or_else(|| Error::UnknownVertex(format!("{:?}", key)))
    }

    /// 获取顶点的键
    pub fn key(&self, id: VertexId) -> Result<&K> {
        self.index
            .key(id)
            .ok_or_else(|| Error::UnknownVertex(id.to_string()))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.index.contains_id(id)
    }

    /// 所有顶点，按 ID 顺序
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.adjacency.len()).map(VertexId::new)
    }

    /// 所有 (顶点, 键)
    pub fn keys(&self) -> impl Iterator<Item = (VertexId, &K)> + '_ {
        self.index.iter()
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    // ==================== 边操作 ====================

    /// 添加边，端点不存在时自动创建，已存在的边覆盖权重
    ///
    /// 权重不满足约束时返回 `InvalidWeight`，图保持不变。
    pub fn edge(&mut self, a: K, b: K, weight: f64) -> Result<Edge> {
        self.check_weight(&a, &b, weight)?;
        let src = self.node(a);
        let dst = self.node(b);
        self.insert(src, dst, weight);
        Ok(Edge::new(src, dst, weight))
    }

    /// 在两个已有顶点之间添加边
    pub fn edge_between(&mut self, src: VertexId, dst: VertexId, weight: f64) -> Result<Edge> {
        let a = self.key(src)?.clone();
        let b = self.key(dst)?.clone();
        self.check_weight(&a, &b, weight)?;
        self.insert(src, dst, weight);
        Ok(Edge::new(src, dst, weight))
    }

    fn check_weight(&self, a: &K, b: &K, weight: f64) -> Result<()> {
        if self.kind.accepts(weight) {
            return Ok(());
        }
        let rule = match self.kind {
            GraphKind::Undirected => "必须为有限正数",
            GraphKind::Directed => "必须为有限非负数",
        };
        Err(Error::InvalidWeight(format!(
            "{:?} - {:?} 的权重 {} {}{}",
            a, b, weight, self.kind, rule
        )))
    }

    fn insert(&mut self, src: VertexId, dst: VertexId, weight: f64) {
        if let Some(old) = self.adjacency[src.index()].insert(dst, weight) {
            tracing::trace!(%src, %dst, old, weight, "覆盖已有边的权重");
        }
        if self.kind == GraphKind::Undirected {
            self.adjacency[dst.index()].insert(src, weight);
        }
    }

    /// 跳过权重检查直接写入，用于构造违反约束的输入
    #[cfg(test)]
    pub(crate) fn insert_unchecked(&mut self, a: K, b: K, weight: f64) {
        let src = self.node(a);
        let dst = self.node(b);
        self.insert(src, dst, weight);
    }

    /// 获取顶点的邻接表
    pub fn adjacency(&self, id: VertexId) -> Result<&Adjacency> {
        self.adjacency
            .get(id.index())
            .ok_or_else(|| Error::UnknownVertex(id.to_string()))
    }

    /// 已校验过的顶点的邻接表
    pub(crate) fn neighbors(&self, id: VertexId) -> &Adjacency {
        &self.adjacency[id.index()]
    }

    /// 通过键查询两点间的权重
    pub fn weight_of(&self, a: &K, b: &K) -> Result<Option<f64>> {
        let src = self.vertex(a)?;
        let dst = self.vertex(b)?;
        Ok(self.weight_between(src, dst))
    }

    /// 通过 ID 查询两点间的权重
    pub fn weight_between(&self, src: VertexId, dst: VertexId) -> Option<f64> {
        self.adjacency
            .get(src.index())
            .and_then(|adj| adj.get(&dst))
            .copied()
    }

    pub fn contains_edge(&self, a: &K, b: &K) -> bool {
        matches!(self.weight_of(a, b), Ok(Some(_)))
    }

    /// 所有边
    ///
    /// 无向图中每条边只出现一次，端点按键排序（`src` 的键不大于 `dst` 的键）。
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for (src, adj) in self.adjacency.iter().enumerate() {
            let src = VertexId::new(src);
            for (&dst, &weight) in adj {
                if self.kind == GraphKind::Directed || self.canonical(src, dst) {
                    edges.push(Edge::new(src, dst, weight));
                }
            }
        }
        edges
    }

    fn canonical(&self, src: VertexId, dst: VertexId) -> bool {
        match (self.index.key(src), self.index.key(dst)) {
            (Some(a), Some(b)) => a <= b,
            _ => false,
        }
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        match self.kind {
            GraphKind::Directed => self.adjacency.iter().map(|adj| adj.len()).sum(),
            GraphKind::Undirected => self.edges().len(),
        }
    }

    /// 所有边的权重之和
    pub fn total_weight(&self) -> f64 {
        self.edges().iter().map(|e| e.weight()).sum()
    }

    // ==================== 派生图 ====================

    /// 合并两个图
    ///
    /// 结果包含两者的全部顶点和边；同一对顶点权重冲突时以 `other` 为准。
    pub fn union(&self, other: &Self) -> Result<Self> {
        if self.kind != other.kind {
            return Err(Error::KindMismatch {
                expected: self.kind,
                found: other.kind,
            });
        }

        let mut out = self.clone();
        for (_, key) in other.keys() {
            out.node(key.clone());
        }
        for e in other.edges() {
            let a = other.key(e.src())?.clone();
            let b = other.key(e.dst())?.clone();
            out.edge(a, b, e.weight())?;
        }
        Ok(out)
    }

    /// 由给定顶点导出的子图，只保留两端都在其中的边
    ///
    /// 子图中顶点按 `ids` 的顺序重新编号。
    pub fn induced_subgraph(&self, ids: &[VertexId]) -> Result<Self> {
        let mut sub = Self::new(self.kind);
        let mut mapping: HashMap<VertexId, VertexId> = HashMap::with_capacity(ids.len());
        for &id in ids {
            let key = self.key(id)?.clone();
            mapping.insert(id, sub.node(key));
        }

        for &id in ids {
            let src = mapping[&id];
            for (nbr, &weight) in self.neighbors(id) {
                if let Some(&dst) = mapping.get(nbr) {
                    sub.insert(src, dst, weight);
                }
            }
        }
        Ok(sub)
    }

    /// 转置图：每条有向边反向，权重不变
    ///
    /// 顶点编号与原图一致。
    pub fn transpose(&self) -> Result<Self> {
        if self.kind != GraphKind::Directed {
            return Err(Error::KindMismatch {
                expected: GraphKind::Directed,
                found: self.kind,
            });
        }

        let mut reversed = Self {
            kind: self.kind,
            index: self.index.clone(),
            adjacency: vec![Adjacency::new(); self.adjacency.len()],
        };
        for e in self.edges() {
            reversed.insert(e.dst(), e.src(), e.weight());
        }
        Ok(reversed)
    }
}
