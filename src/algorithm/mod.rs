//! 图算法模块
//!
//! 包含最小生成树（Kruskal 与分治）、Dijkstra 最短路和预算约束下的瓶颈边

pub mod budget;
pub mod dijkstra;
mod kruskal;
mod partition;
mod union_find;

pub use budget::{
    bottlenecks, max_weight_within_budget, Bottlenecks, BudgetExplorer, BudgetOracle, Strategy,
};
pub use dijkstra::{check_non_negative, dijkstra, dijkstra_from, distances_to, ShortestPaths};
pub use kruskal::kruskal;
pub use partition::{compare_with_kruskal, partition_mst, MstComparison};
pub use union_find::DisjointSetForest;
