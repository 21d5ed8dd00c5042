//! 预算约束下的瓶颈边
//!
//! 给定源点 s、目标 t 和预算 k，求所有总权重不超过 k 的 s → t 路径上
//! 能出现的最大单条边权。没有这样的路径时结果为 -∞。
//!
//! 三种求法结果一致：
//! - 闭式解：正向和反向各一次 Dijkstra，逐边检查 d(s,u) + w + d(v,t) <= k
//! - 递归深度优先搜索
//! - 显式工作栈的迭代搜索
//!
//! 两种搜索在每个顶点上维护 (累计花费, 最重边) 标签的帕累托前沿：
//! 新标签只有在没有被已有标签支配（花费不高且最重边不轻）时才被记录并继续展开。
//! 不使用访问集合，顶点可以被多次访问，由预算保证终止。

use super::dijkstra::{check_non_negative, dijkstra_from, ShortestPaths};
use crate::error::{Error, Result};
use crate::graph::{VertexId, WeightedGraph};
use crate::metrics::global_metrics;
use crate::types::{VertexKey, NO_PATH};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 求解方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// 基于最短路的闭式解
    ClosedForm,
    /// 递归搜索
    Recursive,
    /// 迭代搜索
    Iterative,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::ClosedForm, Strategy::Recursive, Strategy::Iterative];
}

/// 每个目标顶点的瓶颈值，按顶点 ID 排列
#[derive(Debug, Clone, PartialEq)]
pub struct Bottlenecks {
    values: Vec<f64>,
}

impl Bottlenecks {
    /// 到 `v` 的瓶颈值，预算内不可达为 -∞
    pub fn get(&self, v: VertexId) -> f64 {
        self.values.get(v.index()).copied().unwrap_or(NO_PATH)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &b)| (VertexId::new(i), b))
    }

    /// 以键为索引的结果表
    pub fn by_key<'g, K: VertexKey>(&self, graph: &'g WeightedGraph<K>) -> IndexMap<&'g K, f64> {
        graph.keys().map(|(id, key)| (key, self.get(id))).collect()
    }

    /// 预算内可达的目标数
    pub fn reachable_count(&self) -> usize {
        self.values.iter().filter(|&&b| b > NO_PATH).count()
    }
}

fn check_budget(budget: f64) -> Result<()> {
    if budget.is_nan() || budget < 0.0 {
        return Err(Error::InvalidBudget(budget));
    }
    Ok(())
}

/// 花费是否在预算内，带相对容差
///
/// 三种求法都只通过这里比较预算，累加顺序不同带来的舍入差异不会影响结果。
fn within_budget(cost: f64, budget: f64) -> bool {
    cost <= budget + BUDGET_TOLERANCE * budget.abs().max(1.0)
}

const BUDGET_TOLERANCE: f64 = 1e-9;

// ==================== 闭式解 ====================

/// 闭式解查询器
///
/// 正向最短路只算一次；每个目标的反向最短路在第一次查询时计算并缓存，
/// 之后同一目标的不同预算只需扫描一遍边。
pub struct BudgetOracle<'g, K> {
    graph: &'g WeightedGraph<K>,
    /// 反向图：有向图为转置图，无向图为自身
    reverse: WeightedGraph<K>,
    /// 源点出发的最短路
    forward: ShortestPaths,
    /// 目标 -> 各顶点到目标的最短路
    backward: HashMap<VertexId, ShortestPaths>,
}

impl<'g, K: VertexKey> BudgetOracle<'g, K> {
    /// 以 `source` 为源点创建查询器
    pub fn new(graph: &'g WeightedGraph<K>, source: &K) -> Result<Self> {
        let source = graph.vertex(source)?;
        Self::from_vertex(graph, source)
    }

    pub fn from_vertex(graph: &'g WeightedGraph<K>, source: VertexId) -> Result<Self> {
        let forward = dijkstra_from(graph, source)?;
        let reverse = if graph.is_directed() {
            graph.transpose()?
        } else {
            graph.clone()
        };

        Ok(Self {
            graph,
            reverse,
            forward,
            backward: HashMap::new(),
        })
    }

    pub fn source(&self) -> VertexId {
        self.forward.source()
    }

    /// 单个目标的瓶颈值
    pub fn query(&mut self, target: &K, budget: f64) -> Result<f64> {
        let target = self.graph.vertex(target)?;
        self.query_vertex(target, budget)
    }

    pub fn query_vertex(&mut self, target: VertexId, budget: f64) -> Result<f64> {
        check_budget(budget)?;
        if !self.backward.contains_key(&target) {
            let paths = dijkstra_from(&self.reverse, target)?;
            self.backward.insert(target, paths);
        }
        let graph = self.graph;
        let forward = &self.forward;
        let backward = &self.backward[&target];

        let mut best = NO_PATH;
        for u in graph.vertices() {
            let to_u = forward.distance(u);
            if !to_u.is_finite() {
                continue;
            }
            for (&v, &weight) in graph.neighbors(u) {
                let from_v = backward.distance(v);
                if from_v.is_finite() && within_budget(to_u + weight + from_v, budget) && weight > best {
                    best = weight;
                }
            }
        }
        Ok(best)
    }

    /// 所有目标的瓶颈值
    pub fn query_all(&mut self, budget: f64) -> Result<Bottlenecks> {
        check_budget(budget)?;
        let targets: Vec<VertexId> = self.graph.vertices().collect();
        let mut values = Vec::with_capacity(targets.len());
        for t in targets {
            values.push(self.query_vertex(t, budget)?);
        }
        Ok(Bottlenecks { values })
    }
}

// ==================== 搜索 ====================

/// 搜索标签
#[derive(Debug, Clone, Copy, PartialEq)]
struct Label {
    /// 累计花费
    cost: f64,
    /// 路径上最重的边
    heaviest: f64,
}

impl Label {
    fn dominates(&self, other: &Label) -> bool {
        self.cost <= other.cost && self.heaviest >= other.heaviest
    }
}

/// 一次搜索的全部标签
struct Search {
    fronts: Vec<Vec<Label>>,
    recorded: u64,
    pruned: u64,
}

impl Search {
    fn new(n: usize) -> Self {
        Self {
            fronts: vec![Vec::new(); n],
            recorded: 0,
            pruned: 0,
        }
    }

    /// 尝试在 `v` 记录标签，被支配时返回 false
    fn offer(&mut self, v: VertexId, label: Label) -> bool {
        let front = &mut self.fronts[v.index()];
        if front.iter().any(|l| l.dominates(&label)) {
            self.pruned += 1;
            return false;
        }
        front.retain(|l| !label.dominates(l));
        front.push(label);
        self.recorded += 1;
        true
    }

    fn finish(self, strategy: Strategy) -> Bottlenecks {
        global_metrics().record_budget_search(self.recorded, self.pruned);
        tracing::debug!(
            ?strategy,
            recorded = self.recorded,
            pruned = self.pruned,
            "预算搜索完成"
        );

        let values = self
            .fronts
            .iter()
            .map(|front| front.iter().fold(NO_PATH, |best, l| best.max(l.heaviest)))
            .collect();
        Bottlenecks { values }
    }
}

/// 预算搜索器
pub struct BudgetExplorer<'g, K> {
    graph: &'g WeightedGraph<K>,
    budget: f64,
}

impl<'g, K: VertexKey> BudgetExplorer<'g, K> {
    /// 创建搜索器，预算为 NaN 或负数时失败
    pub fn new(graph: &'g WeightedGraph<K>, budget: f64) -> Result<Self> {
        check_budget(budget)?;
        check_non_negative(graph)?;
        Ok(Self { graph, budget })
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    fn start(&self, source: &K) -> Result<(VertexId, Search, Label)> {
        let source = self.graph.vertex(source)?;
        let mut search = Search::new(self.graph.vertex_count());
        let label = Label {
            cost: 0.0,
            heaviest: NO_PATH,
        };
        search.offer(source, label);
        Ok((source, search, label))
    }

    /// 递归深度优先搜索
    ///
    /// 递归深度等于最长的预算内路径的边数，大图应使用 [`iterative`](Self::iterative)。
    pub fn recursive(&self, source: &K) -> Result<Bottlenecks> {
        let (source, mut search, label) = self.start(source)?;
        self.visit(source, label, &mut search);
        Ok(search.finish(Strategy::Recursive))
    }

    fn visit(&self, v: VertexId, at: Label, search: &mut Search) {
        for (&u, &weight) in self.graph.neighbors(v) {
            let cost = at.cost + weight;
            if !within_budget(cost, self.budget) {
                continue;
            }
            let next = Label {
                cost,
                heaviest: at.heaviest.max(weight),
            };
            if search.offer(u, next) {
                self.visit(u, next, search);
            }
        }
    }

    /// 显式工作栈的迭代搜索
    pub fn iterative(&self, source: &K) -> Result<Bottlenecks> {
        let (source, mut search, label) = self.start(source)?;

        let mut worklist = vec![(source, label)];
        while let Some((v, at)) = worklist.pop() {
            for (&u, &weight) in self.graph.neighbors(v) {
                let cost = at.cost + weight;
                if !within_budget(cost, self.budget) {
                    continue;
                }
                let next = Label {
                    cost,
                    heaviest: at.heaviest.max(weight),
                };
                if search.offer(u, next) {
                    worklist.push((u, next));
                }
            }
        }

        Ok(search.finish(Strategy::Iterative))
    }
}

// ==================== 入口 ====================

/// 用指定方式计算从 `source` 出发所有目标的瓶颈值
pub fn bottlenecks<K: VertexKey>(
    graph: &WeightedGraph<K>,
    source: &K,
    budget: f64,
    strategy: Strategy,
) -> Result<Bottlenecks> {
    match strategy {
        Strategy::ClosedForm => {
            check_budget(budget)?;
            BudgetOracle::new(graph, source)?.query_all(budget)
        }
        Strategy::Recursive => BudgetExplorer::new(graph, budget)?.recursive(source),
        Strategy::Iterative => BudgetExplorer::new(graph, budget)?.iterative(source),
    }
}

/// 单个 (源点, 目标, 预算) 查询
pub fn max_weight_within_budget<K: VertexKey>(
    graph: &WeightedGraph<K>,
    source: &K,
    target: &K,
    budget: f64,
    strategy: Strategy,
) -> Result<f64> {
    let t = graph.vertex(target)?;
    match strategy {
        Strategy::ClosedForm => BudgetOracle::new(graph, source)?.query_vertex(t, budget),
        _ => Ok(bottlenecks(graph, source, budget, strategy)?.get(t)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::dijkstra::tests::example_graph;
    use crate::types::GraphKind;

    fn all_agree<K: VertexKey>(graph: &WeightedGraph<K>, source: &K, budget: f64) -> Bottlenecks {
        let results: Vec<Bottlenecks> = Strategy::ALL
            .iter()
            .map(|&s| bottlenecks(graph, source, budget, s).unwrap())
            .collect();
        assert_eq!(results[0], results[1], "闭式解与递归搜索不一致");
        assert_eq!(results[0], results[2], "闭式解与迭代搜索不一致");
        results[0].clone()
    }

    #[test]
    fn test_example_with_budget_22() {
        let graph = example_graph();
        let result = all_agree(&graph, &"s", 22.0);
        let by_key = result.by_key(&graph);

        let expected = [
            ("s", NO_PATH),
            ("u", 7.0),
            ("x", 6.0),
            ("p", 5.0),
            ("v", 10.0),
            ("y", 9.0),
            ("q", 8.0),
            ("t", 9.0),
        ];
        for (key, b) in expected {
            assert_eq!(by_key[&key], b, "瓶颈 {}", key);
        }
    }

    #[test]
    fn test_example_tightening_budget() {
        let graph = example_graph();

        for strategy in Strategy::ALL {
            let t = |k| max_weight_within_budget(&graph, &"s", &"t", k, strategy).unwrap();
            assert_eq!(t(23.0), 10.0);
            assert_eq!(t(19.0), 8.0);
            assert_eq!(t(18.0), NO_PATH);
        }
    }

    #[test]
    fn test_cheaper_lighter_label_is_kept() {
        // 直达 v 的标签更重但更贵；经 a 到 v 更便宜，才能在预算内继续到 t
        let graph = WeightedGraph::from_edges(
            GraphKind::Directed,
            vec![("s", "v", 6.0), ("s", "a", 1.0), ("a", "v", 1.0), ("v", "t", 5.0)],
        )
        .unwrap();

        let result = all_agree(&graph, &"s", 8.0);
        assert_eq!(result.get(graph.vertex(&"t").unwrap()), 5.0);
        assert_eq!(result.get(graph.vertex(&"v").unwrap()), 6.0);
    }

    #[test]
    fn test_cycle_back_to_source() {
        let graph = WeightedGraph::from_edges(
            GraphKind::Directed,
            vec![("s", "a", 2.0), ("a", "s", 3.0)],
        )
        .unwrap();

        let s = graph.vertex(&"s").unwrap();
        assert_eq!(all_agree(&graph, &"s", 5.0).get(s), 3.0);
        assert_eq!(all_agree(&graph, &"s", 4.9).get(s), NO_PATH);
    }

    #[test]
    fn test_budget_equal_to_path_cost() {
        // 0.1 + 0.2 + 0.3 在浮点下略大于 0.6
        let graph = WeightedGraph::from_edges(
            GraphKind::Directed,
            vec![("s", "a", 0.1), ("a", "b", 0.2), ("b", "t", 0.3)],
        )
        .unwrap();

        let result = all_agree(&graph, &"s", 0.6);
        assert_eq!(result.values(), &[NO_PATH, 0.1, 0.2, 0.3]);

        let t = graph.vertex(&"t").unwrap();
        assert_eq!(all_agree(&graph, &"s", 0.59).get(t), NO_PATH);
    }

    #[test]
    fn test_zero_weight_cycle_terminates() {
        let graph = WeightedGraph::from_edges(
            GraphKind::Directed,
            vec![("a", "b", 0.0), ("b", "a", 0.0), ("b", "c", 2.0)],
        )
        .unwrap();

        let result = all_agree(&graph, &"a", 5.0);
        assert_eq!(result.get(graph.vertex(&"c").unwrap()), 2.0);
        assert_eq!(result.get(graph.vertex(&"a").unwrap()), 0.0);
    }

    #[test]
    fn test_infinite_budget() {
        let graph = WeightedGraph::from_edges(
            GraphKind::Directed,
            vec![("a", "b", 1.0), ("b", "a", 4.0), ("b", "c", 2.0)],
        )
        .unwrap();

        let result = all_agree(&graph, &"a", f64::INFINITY);
        assert_eq!(result.get(graph.vertex(&"c").unwrap()), 4.0);
    }

    #[test]
    fn test_undirected_graph_agrees() {
        let graph = WeightedGraph::from_edges(
            GraphKind::Undirected,
            vec![
                ("a", "b", 3.0),
                ("b", "c", 1.0),
                ("c", "d", 4.0),
                ("a", "d", 9.0),
                ("b", "d", 2.0),
            ],
        )
        .unwrap();

        for budget in [0.0, 1.0, 3.0, 5.5, 8.0, 20.0] {
            all_agree(&graph, &"a", budget);
        }
    }

    #[test]
    fn test_zero_budget() {
        let graph = example_graph();
        let result = all_agree(&graph, &"s", 0.0);
        assert_eq!(result.reachable_count(), 0);
    }

    #[test]
    fn test_invalid_budget() {
        let graph = example_graph();
        for budget in [-1.0, f64::NAN] {
            for strategy in Strategy::ALL {
                assert!(matches!(
                    bottlenecks(&graph, &"s", budget, strategy),
                    Err(Error::InvalidBudget(_))
                ));
            }
        }
    }

    #[test]
    fn test_unknown_vertices() {
        let graph = example_graph();
        for strategy in Strategy::ALL {
            assert!(matches!(
                bottlenecks(&graph, &"nope", 10.0, strategy),
                Err(Error::UnknownVertex(_))
            ));
            assert!(matches!(
                max_weight_within_budget(&graph, &"s", &"nope", 10.0, strategy),
                Err(Error::UnknownVertex(_))
            ));
        }
    }

    #[test]
    fn test_oracle_reuses_target_distances() {
        let graph = example_graph();
        let mut oracle = BudgetOracle::new(&graph, &"s").unwrap();

        assert_eq!(oracle.query(&"t", 22.0).unwrap(), 9.0);
        assert_eq!(oracle.query(&"t", 19.0).unwrap(), 8.0);
        assert_eq!(oracle.backward.len(), 1);
        assert_eq!(oracle.source(), graph.vertex(&"s").unwrap());
    }
}
