//! 分治最小生成树
//!
//! 把顶点交错分成两半，分别求解后用最轻的割边连接。
//! 只在完全图或足够稠密、每次划分都有割边的图上有定义；
//! 遇到空割集时返回 `DisconnectedPartition`。

use super::kruskal::kruskal;
use crate::error::{Error, Result};
use crate::graph::{Edge, VertexId, WeightedGraph};
use crate::metrics::global_metrics;
use crate::types::{GraphKind, VertexKey};
use serde::{Deserialize, Serialize};

/// 一次二分的结果
struct Bipartition<K> {
    left: WeightedGraph<K>,
    right: WeightedGraph<K>,
    /// 跨越两半的边，按原图的规范边顺序
    cut: Vec<Edge>,
}

/// 按枚举顺序交错划分：偶数位置进左半，奇数位置进右半
fn bipartition<K: VertexKey>(graph: &WeightedGraph<K>) -> Result<Bipartition<K>> {
    let (left_ids, right_ids): (Vec<VertexId>, Vec<VertexId>) =
        graph.vertices().partition(|v| v.index() % 2 == 0);

    let cut = graph
        .edges()
        .into_iter()
        .filter(|e| e.src().index() % 2 != e.dst().index() % 2)
        .collect();

    Ok(Bipartition {
        left: graph.induced_subgraph(&left_ids)?,
        right: graph.induced_subgraph(&right_ids)?,
        cut,
    })
}

/// 最轻的割边，权重相同时取最先出现的
fn lightest(cut: &[Edge]) -> Option<Edge> {
    let mut best: Option<Edge> = None;
    for &e in cut {
        match best {
            Some(b) if b.weight() <= e.weight() => {}
            _ => best = Some(e),
        }
    }
    best
}

/// 不多于两个顶点的图：保留两点之间的边（如果有）
fn base_case<K: VertexKey>(graph: &WeightedGraph<K>) -> Result<WeightedGraph<K>> {
    let mut tree = WeightedGraph::undirected();
    for (_, key) in graph.keys() {
        tree.node(key.clone());
    }
    if graph.vertex_count() < 2 {
        return Ok(tree);
    }

    let (a, b) = (VertexId::new(0), VertexId::new(1));
    match graph.weight_between(a, b) {
        Some(weight) => {
            tree.edge_between(a, b, weight)?;
            Ok(tree)
        }
        None => Err(empty_cut(1, 1)),
    }
}

fn empty_cut(left: usize, right: usize) -> Error {
    global_metrics().record_partition_failure();
    tracing::warn!(left, right, "划分的两侧之间没有边");
    Error::DisconnectedPartition { left, right }
}

fn divide<K: VertexKey>(graph: &WeightedGraph<K>) -> Result<WeightedGraph<K>> {
    global_metrics().record_partition_call();
    if graph.vertex_count() <= 2 {
        return base_case(graph);
    }

    let Bipartition { left, right, cut } = bipartition(graph)?;
    tracing::trace!(
        left = left.vertex_count(),
        right = right.vertex_count(),
        cut = cut.len(),
        "二分"
    );

    let bridge = match lightest(&cut) {
        Some(e) => e,
        None => return Err(empty_cut(left.vertex_count(), right.vertex_count())),
    };

    let left_tree = divide(&left)?;
    let right_tree = divide(&right)?;

    let mut tree = left_tree.union(&right_tree)?;
    tree.edge(
        graph.key(bridge.src())?.clone(),
        graph.key(bridge.dst())?.clone(),
        bridge.weight(),
    )?;
    Ok(tree)
}

/// 分治求最小生成树
///
/// 输出的顶点编号与输入一致。
pub fn partition_mst<K: VertexKey>(graph: &WeightedGraph<K>) -> Result<WeightedGraph<K>> {
    if graph.kind() != GraphKind::Undirected {
        return Err(Error::KindMismatch {
            expected: GraphKind::Undirected,
            found: graph.kind(),
        });
    }

    let tree = divide(graph)?;

    let mut ordered = WeightedGraph::undirected();
    for (_, key) in graph.keys() {
        ordered.node(key.clone());
    }
    let ordered = ordered.union(&tree)?;

    tracing::debug!(
        vertices = ordered.vertex_count(),
        edges = ordered.edge_count(),
        weight = ordered.total_weight(),
        "分治生成树完成"
    );
    Ok(ordered)
}

/// 分治结果与 Kruskal 的对比
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MstComparison {
    pub partition_weight: f64,
    pub kruskal_weight: f64,
}

impl MstComparison {
    /// 分治结果是否也是最小生成树
    pub fn is_minimal(&self) -> bool {
        let tolerance = 1e-9 * self.kruskal_weight.abs().max(1.0);
        (self.partition_weight - self.kruskal_weight).abs() <= tolerance
    }
}

/// 同时运行两种算法并比较总权重
pub fn compare_with_kruskal<K: VertexKey>(graph: &WeightedGraph<K>) -> Result<MstComparison> {
    let partition_weight = partition_mst(graph)?.total_weight();
    let kruskal_weight = kruskal(graph)?.total_weight();
    Ok(MstComparison {
        partition_weight,
        kruskal_weight,
    })
}
