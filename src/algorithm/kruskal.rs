//! Kruskal 最小生成树
//!
//! 输入不连通时不会失败，而是返回最小生成森林

use super::union_find::DisjointSetForest;
use crate::error::{Error, Result};
use crate::graph::WeightedGraph;
use crate::metrics::global_metrics;
use crate::types::{GraphKind, VertexKey};

/// 计算无向图的最小生成树（森林）
///
/// 边按权重升序处理，权重相同时按规范端点键的字典序，结果可复现。
/// 输出包含输入的全部顶点，顶点编号与输入一致。
pub fn kruskal<K: VertexKey>(graph: &WeightedGraph<K>) -> Result<WeightedGraph<K>> {
    if graph.kind() != GraphKind::Undirected {
        return Err(Error::KindMismatch {
            expected: GraphKind::Undirected,
            found: graph.kind(),
        });
    }

    let mut tree = WeightedGraph::undirected();
    for (_, key) in graph.keys() {
        tree.node(key.clone());
    }

    let canonical = graph.edges();
    let mut edges = Vec::with_capacity(canonical.len());
    for e in canonical {
        edges.push((e, graph.key(e.src())?, graph.key(e.dst())?));
    }
    edges.sort_by(|(x, xa, xb), (y, ya, yb)| {
        x.weight()
            .total_cmp(&y.weight())
            .then_with(|| xa.cmp(ya))
            .then_with(|| xb.cmp(yb))
    });

    let mut forest = DisjointSetForest::with_capacity(graph.vertex_count());
    for v in graph.vertices() {
        forest.find(v);
    }

    for (e, _, _) in edges {
        if forest.union(e.src(), e.dst()) {
            tree.edge_between(e.src(), e.dst(), e.weight())?;
        }
    }

    global_metrics().record_kruskal();
    tracing::debug!(
        vertices = tree.vertex_count(),
        edges = tree.edge_count(),
        components = forest.set_count(),
        weight = tree.total_weight(),
        "Kruskal 完成"
    );

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic_graph() -> WeightedGraph<&'static str> {
        WeightedGraph::from_edges(
            GraphKind::Undirected,
            vec![
                ("a", "b", 4.0),
                ("a", "h", 8.0),
                ("b", "c", 8.0),
                ("b", "h", 11.0),
                ("c", "d", 7.0),
                ("c", "f", 4.0),
                ("c", "i", 2.0),
                ("d", "e", 9.0),
                ("d", "f", 14.0),
                ("e", "f", 10.0),
                ("f", "g", 2.0),
                ("g", "h", 1.0),
                ("g", "i", 6.0),
                ("h", "i", 7.0),
            ],
        )
        .unwrap()
    }

    fn is_connected<K: VertexKey>(graph: &WeightedGraph<K>) -> bool {
        let mut forest = DisjointSetForest::new();
        for v in graph.vertices() {
            forest.find(v);
        }
        for e in graph.edges() {
            forest.union(e.src(), e.dst());
        }
        forest.set_count() <= 1
    }

    #[test]
    fn test_classic_mst_weight() {
        let graph = classic_graph();
        let tree = kruskal(&graph).unwrap();

        assert_eq!(tree.total_weight(), 37.0);
        assert_eq!(tree.vertex_count(), 9);
        assert_eq!(tree.edge_count(), 8);
        assert!(is_connected(&tree));
    }

    #[test]
    fn test_tie_break_is_lexicographic() {
        // b-c 和 a-h 权重都是 8，只能选其一
        let graph = classic_graph();
        let tree = kruskal(&graph).unwrap();

        assert!(tree.contains_edge(&"a", &"h"));
        assert!(!tree.contains_edge(&"b", &"c"));
    }

    #[test]
    fn test_disconnected_input_gives_forest() {
        let mut graph = WeightedGraph::undirected();
        graph.edge("a", "b", 1.0).unwrap();
        graph.edge("b", "c", 2.0).unwrap();
        graph.edge("a", "c", 3.0).unwrap();
        graph.edge("x", "y", 5.0).unwrap();
        graph.node("alone");

        let tree = kruskal(&graph).unwrap();
        assert_eq!(tree.vertex_count(), 6);
        assert_eq!(tree.edge_count(), 3);
        assert_eq!(tree.total_weight(), 8.0);
        assert!(tree.contains(&"alone"));
    }

    #[test]
    fn test_dense_graph_uses_every_edge() {
        // 边数远多于顶点数；最小生成树是相邻编号连成的链
        let graph = crate::graph::builder::complete_by(0..8i32, |a, b| f64::from((a - b).abs())).unwrap();
        assert_eq!(graph.edge_count(), 28);

        let tree = kruskal(&graph).unwrap();
        assert_eq!(tree.edge_count(), 7);
        assert_eq!(tree.total_weight(), 7.0);
        for i in 0..7 {
            assert!(tree.contains_edge(&i, &(i + 1)));
        }
    }

    #[test]
    fn test_rejects_directed_graph() {
        let mut graph = WeightedGraph::directed();
        graph.edge("a", "b", 1.0).unwrap();

        assert!(matches!(
            kruskal(&graph),
            Err(Error::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_matches_brute_force_on_small_graph() {
        let graph = WeightedGraph::from_edges(
            GraphKind::Undirected,
            vec![
                (0, 1, 3.0),
                (0, 2, 1.0),
                (0, 3, 4.0),
                (1, 2, 2.0),
                (1, 3, 5.0),
                (2, 3, 6.0),
            ],
        )
        .unwrap();

        // 枚举全部 3 条边的子集，找出最轻的生成树
        let edges = graph.edges();
        let mut best = f64::INFINITY;
        for i in 0..edges.len() {
            for j in i + 1..edges.len() {
                for k in j + 1..edges.len() {
                    let mut forest = DisjointSetForest::new();
                    let picked = [edges[i], edges[j], edges[k]];
                    if picked.iter().all(|e| forest.union(e.src(), e.dst())) {
                        best = best.min(picked.iter().map(|e| e.weight()).sum());
                    }
                }
            }
        }

        let tree = kruskal(&graph).unwrap();
        assert_eq!(tree.total_weight(), best);
        assert_eq!(best, 7.0);
    }
}
