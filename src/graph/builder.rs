//! 批量构造完全图

use super::graph::WeightedGraph;
use super::vertex::VertexId;
use crate::error::Result;
use crate::types::VertexKey;
use rand::seq::SliceRandom;
use rand::Rng;

/// 按给定顺序登记顶点，重复的键只保留第一次
fn register<K: VertexKey>(graph: &mut WeightedGraph<K>, keys: impl IntoIterator<Item = K>) -> Vec<VertexId> {
    let mut ids = Vec::new();
    for key in keys {
        let id = graph.node(key);
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// 无向完全图，边权为 `initial, initial + 1, ...` 的随机排列
///
/// 所有权重互不相同，因此最小生成树唯一。
pub fn complete<K, I, R>(keys: I, initial: f64, rng: &mut R) -> Result<WeightedGraph<K>>
where
    K: VertexKey,
    I: IntoIterator<Item = K>,
    R: Rng + ?Sized,
{
    let mut graph = WeightedGraph::undirected();
    let ids = register(&mut graph, keys);

    let mut pairs = Vec::with_capacity(ids.len() * ids.len().saturating_sub(1) / 2);
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            pairs.push((a, b));
        }
    }
    pairs.shuffle(rng);

    for (n, (a, b)) in pairs.into_iter().enumerate() {
        graph.edge_between(a, b, initial + n as f64)?;
    }
    Ok(graph)
}

/// 无向完全图，边权由 `weight(a, b)` 给出
pub fn complete_by<K, I, F>(keys: I, mut weight: F) -> Result<WeightedGraph<K>>
where
    K: VertexKey,
    I: IntoIterator<Item = K>,
    F: FnMut(&K, &K) -> f64,
{
    let mut graph = WeightedGraph::undirected();
    let ids = register(&mut graph, keys);

    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            let w = weight(graph.key(a)?, graph.key(b)?);
            graph.edge_between(a, b, w)?;
        }
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_complete_graph_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = complete("abcde".chars(), 1.0, &mut rng).unwrap();

        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.edge_count(), 10);

        let mut weights: Vec<f64> = graph.edges().iter().map(|e| e.weight()).collect();
        weights.sort_by(|a, b| a.total_cmp(b));
        let expected: Vec<f64> = (1..=10).map(|w| w as f64).collect();
        assert_eq!(weights, expected);
    }

    #[test]
    fn test_complete_ignores_duplicate_keys() {
        let mut rng = StdRng::seed_from_u64(1);
        let graph = complete(vec!["a", "b", "a"], 1.0, &mut rng).unwrap();

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_complete_by_weight_fn() {
        let graph = complete_by(1..=4u32, |a, b| (a * b) as f64).unwrap();

        assert_eq!(graph.edge_count(), 6);
        assert_eq!(graph.weight_of(&2, &4).unwrap(), Some(8.0));
    }

    #[test]
    fn test_complete_rejects_bad_initial_weight() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = complete(vec!["a", "b"], 0.0, &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidWeight(_)));
    }
}
