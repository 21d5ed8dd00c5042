//! WeightGraph - 带权图与经典图算法
//!
//! 提供有向/无向带权图以及：
//! - 最小生成树（Kruskal、分治）
//! - Dijkstra 单源最短路
//! - 预算约束下的最大瓶颈边（闭式、递归、迭代三种策略）
//! - DOT 可视化和随机测试图存储

pub mod algorithm;
pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod metrics;
pub mod render;
pub mod store;
pub mod types;

// 重导出常用类型
pub use algorithm::{
    bottlenecks, compare_with_kruskal, dijkstra, kruskal, max_weight_within_budget,
    partition_mst, BudgetOracle, ShortestPaths, Strategy,
};
pub use config::Config;
pub use error::{Error, Result};
pub use graph::{Edge, VertexId, WeightedGraph};
pub use render::{DotRenderer, GraphRenderer, RenderRequest};
pub use store::{GraphStore, JsonGraphStore, TestGraph};
pub use types::{GraphKind, VertexKey, NO_PATH, UNREACHABLE};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
