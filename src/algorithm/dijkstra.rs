//! Dijkstra 单源最短路
//!
//! 只接受非负权重，运行前先扫描一遍所有边

use crate::error::{Error, Result};
use crate::graph::{VertexId, WeightedGraph};
use crate::metrics::global_metrics;
use crate::types::{Distance, VertexKey, UNREACHABLE};
use indexmap::IndexMap;
use priority_queue::PriorityQueue;
use std::cmp::{Ordering, Reverse};

/// 单源最短路结果
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    /// 源点
    source: VertexId,
    /// 按顶点 ID 排列的距离，不可达为 +∞
    distances: Vec<f64>,
    /// 最短路树中的前驱
    predecessors: Vec<Option<VertexId>>,
}

impl ShortestPaths {
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// 到 `v` 的距离，不可达或不存在的顶点为 +∞
    pub fn distance(&self, v: VertexId) -> f64 {
        self.distances.get(v.index()).copied().unwrap_or(UNREACHABLE)
    }

    pub fn is_reachable(&self, v: VertexId) -> bool {
        self.distance(v) < UNREACHABLE
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// 遍历 (顶点, 距离)
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.distances
            .iter()
            .enumerate()
            .map(|(i, &d)| (VertexId::new(i), d))
    }

    /// 以键为索引的距离表
    pub fn by_key<'g, K: VertexKey>(&self, graph: &'g WeightedGraph<K>) -> IndexMap<&'g K, f64> {
        graph
            .keys()
            .map(|(id, key)| (key, self.distance(id)))
            .collect()
    }

    /// 从源点到 `target` 的一条最短路径，不可达时返回 None
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        if !self.is_reachable(target) {
            return None;
        }
        Some(route(&self.predecessors, target))
    }
}

/// 沿前驱回溯出从源点开始的顶点序列
fn route(predecessors: &[Option<VertexId>], target: VertexId) -> Vec<VertexId> {
    let mut path = vec![target];
    let mut current = target;
    while let Some(prev) = predecessors[current.index()] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// 按键的字典序比较两条路径
fn compare_routes<K: VertexKey>(graph: &WeightedGraph<K>, a: &[VertexId], b: &[VertexId]) -> Ordering {
    let left: Vec<Option<&K>> = a.iter().map(|&v| graph.key(v).ok()).collect();
    let right: Vec<Option<&K>> = b.iter().map(|&v| graph.key(v).ok()).collect();
    left.cmp(&right)
}

/// 检查图中没有负权边
pub fn check_non_negative<K: VertexKey>(graph: &WeightedGraph<K>) -> Result<()> {
    for e in graph.edges() {
        let weight = e.weight();
        if weight.is_nan() || weight < 0.0 {
            return Err(Error::NegativeWeight {
                from: format!("{:?}", graph.key(e.src())?),
                to: format!("{:?}", graph.key(e.dst())?),
                weight,
            });
        }
    }
    Ok(())
}

/// 从键对应的顶点出发计算最短路
pub fn dijkstra<K: VertexKey>(graph: &WeightedGraph<K>, source: &K) -> Result<ShortestPaths> {
    let source = graph.vertex(source)?;
    dijkstra_from(graph, source)
}

/// 从顶点 ID 出发计算最短路
///
/// 等长路径中保留键序列字典序最小的那条作为最短路树的分支。
pub fn dijkstra_from<K: VertexKey>(graph: &WeightedGraph<K>, source: VertexId) -> Result<ShortestPaths> {
    if !graph.contains_vertex(source) {
        return Err(Error::UnknownVertex(source.to_string()));
    }
    check_non_negative(graph)?;

    let n = graph.vertex_count();
    let mut distances = vec![UNREACHABLE; n];
    let mut predecessors: Vec<Option<VertexId>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut relaxations = 0u64;

    let mut queue = PriorityQueue::new();
    distances[source.index()] = 0.0;
    queue.push(source, Reverse(Distance(0.0)));

    while let Some((u, Reverse(Distance(du)))) = queue.pop() {
        settled[u.index()] = true;

        for (&v, &weight) in graph.neighbors(u) {
            if settled[v.index()] {
                continue;
            }
            let candidate = du + weight;
            let current = distances[v.index()];

            if candidate < current {
                distances[v.index()] = candidate;
                predecessors[v.index()] = Some(u);
                queue.push_increase(v, Reverse(Distance(candidate)));
                relaxations += 1;
            } else if candidate == current {
                if let Some(prev) = predecessors[v.index()] {
                    // 两条候选都以 v 结尾，比较完整路径
                    let mut via_u = route(&predecessors, u);
                    via_u.push(v);
                    let mut via_prev = route(&predecessors, prev);
                    via_prev.push(v);
                    if compare_routes(graph, &via_u, &via_prev) == Ordering::Less {
                        predecessors[v.index()] = Some(u);
                    }
                }
            }
        }
    }

    global_metrics().record_dijkstra(relaxations);
    tracing::debug!(
        %source,
        vertices = n,
        relaxations,
        reachable = distances.iter().filter(|d| d.is_finite()).count(),
        "Dijkstra 完成"
    );

    Ok(ShortestPaths {
        source,
        distances,
        predecessors,
    })
}

/// 每个顶点到 `target` 的最短距离
///
/// 有向图在转置图上运行；无向图直接运行。结果中的顶点 ID 与原图一致。
pub fn distances_to<K: VertexKey>(graph: &WeightedGraph<K>, target: VertexId) -> Result<ShortestPaths> {
    if graph.is_directed() {
        dijkstra_from(&graph.transpose()?, target)
    } else {
        dijkstra_from(graph, target)
    }
}
