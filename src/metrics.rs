//! 性能指标收集模块
//!
//! 统计各算法的调用次数和主要工作量，支持快照和 Prometheus 文本导出

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// 算法指标
#[derive(Debug)]
pub struct AlgorithmMetrics {
    /// 最短路统计
    shortest_path: ShortestPathStats,
    /// 生成树统计
    spanning_tree: SpanningTreeStats,
    /// 预算瓶颈统计
    budget: BudgetStats,
    /// 启动时间
    start_time: Instant,
}

#[derive(Debug, Default)]
struct ShortestPathStats {
    /// Dijkstra 运行次数
    runs: AtomicU64,
    /// 松弛成功次数
    relaxations: AtomicU64,
}

#[derive(Debug, Default)]
struct SpanningTreeStats {
    /// Kruskal 运行次数
    kruskal_runs: AtomicU64,
    /// 分治递归调用次数
    partition_calls: AtomicU64,
    /// 因割集为空而失败的次数
    partition_failures: AtomicU64,
}

#[derive(Debug, Default)]
struct BudgetStats {
    /// 查询次数
    queries: AtomicU64,
    /// 记录的标签数
    labels_recorded: AtomicU64,
    /// 被支配而丢弃的标签数
    labels_pruned: AtomicU64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub dijkstra_runs: u64,
    pub relaxations: u64,

    pub kruskal_runs: u64,
    pub partition_calls: u64,
    pub partition_failures: u64,

    pub budget_queries: u64,
    pub labels_recorded: u64,
    pub labels_pruned: u64,

    pub uptime_seconds: u64,
}

impl AlgorithmMetrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            shortest_path: ShortestPathStats::default(),
            spanning_tree: SpanningTreeStats::default(),
            budget: BudgetStats::default(),
            start_time: Instant::now(),
        }
    }

    /// 记录一次 Dijkstra
    pub fn record_dijkstra(&self, relaxations: u64) {
        self.shortest_path.runs.fetch_add(1, Ordering::Relaxed);
        self.shortest_path
            .relaxations
            .fetch_add(relaxations, Ordering::Relaxed);
    }

    /// 记录一次 Kruskal
    pub fn record_kruskal(&self) {
        self.spanning_tree.kruskal_runs.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录一次分治递归调用
    pub fn record_partition_call(&self) {
        self.spanning_tree
            .partition_calls
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 记录一次割集为空
    pub fn record_partition_failure(&self) {
        self.spanning_tree
            .partition_failures
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 记录一次预算搜索
    pub fn record_budget_search(&self, recorded: u64, pruned: u64) {
        self.budget.queries.fetch_add(1, Ordering::Relaxed);
        self.budget
            .labels_recorded
            .fetch_add(recorded, Ordering::Relaxed);
        self.budget.labels_pruned.fetch_add(pruned, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            dijkstra_runs: self.shortest_path.runs.load(Ordering::Relaxed),
            relaxations: self.shortest_path.relaxations.load(Ordering::Relaxed),
            kruskal_runs: self.spanning_tree.kruskal_runs.load(Ordering::Relaxed),
            partition_calls: self.spanning_tree.partition_calls.load(Ordering::Relaxed),
            partition_failures: self
                .spanning_tree
                .partition_failures
                .load(Ordering::Relaxed),
            budget_queries: self.budget.queries.load(Ordering::Relaxed),
            labels_recorded: self.budget.labels_recorded.load(Ordering::Relaxed),
            labels_pruned: self.budget.labels_pruned.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> String {
        let snapshot = self.snapshot();
        let counters = [
            ("dijkstra_runs_total", "Number of Dijkstra runs", snapshot.dijkstra_runs),
            ("relaxations_total", "Successful edge relaxations", snapshot.relaxations),
            ("kruskal_runs_total", "Number of Kruskal runs", snapshot.kruskal_runs),
            ("partition_calls_total", "Divide-and-conquer MST calls", snapshot.partition_calls),
            ("partition_failures_total", "Partitions with an empty cut", snapshot.partition_failures),
            ("budget_queries_total", "Budget bottleneck searches", snapshot.budget_queries),
            ("labels_recorded_total", "Labels recorded by budget searches", snapshot.labels_recorded),
            ("labels_pruned_total", "Dominated labels discarded", snapshot.labels_pruned),
            ("uptime_seconds", "Seconds since metrics creation", snapshot.uptime_seconds),
        ];

        let mut content = String::new();
        for (name, help, value) in counters {
            content.push_str(&format!("# HELP weightgraph_{} {}\n", name, help));
            content.push_str(&format!("# TYPE weightgraph_{} counter\n", name));
            content.push_str(&format!("weightgraph_{} {}\n", name, value));
        }
        content
    }

    /// 重置所有指标
    pub fn reset(&self) {
        self.shortest_path.runs.store(0, Ordering::Relaxed);
        self.shortest_path.relaxations.store(0, Ordering::Relaxed);

        self.spanning_tree.kruskal_runs.store(0, Ordering::Relaxed);
        self.spanning_tree.partition_calls.store(0, Ordering::Relaxed);
        self.spanning_tree
            .partition_failures
            .store(0, Ordering::Relaxed);

        self.budget.queries.store(0, Ordering::Relaxed);
        self.budget.labels_recorded.store(0, Ordering::Relaxed);
        self.budget.labels_pruned.store(0, Ordering::Relaxed);
    }
}

impl Default for AlgorithmMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<AlgorithmMetrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(AlgorithmMetrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<AlgorithmMetrics> {
    METRICS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let metrics = AlgorithmMetrics::new();

        metrics.record_dijkstra(12);
        metrics.record_dijkstra(3);
        metrics.record_kruskal();
        metrics.record_partition_call();
        metrics.record_partition_failure();
        metrics.record_budget_search(10, 4);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.dijkstra_runs, 2);
        assert_eq!(snapshot.relaxations, 15);
        assert_eq!(snapshot.kruskal_runs, 1);
        assert_eq!(snapshot.partition_failures, 1);
        assert_eq!(snapshot.labels_recorded, 10);
        assert_eq!(snapshot.labels_pruned, 4);

        metrics.reset();
        assert_eq!(metrics.snapshot().relaxations, 0);
    }

    #[test]
    fn test_prometheus_export() {
        let metrics = AlgorithmMetrics::new();
        metrics.record_kruskal();

        let content = metrics.to_prometheus();
        assert!(content.contains("weightgraph_kruskal_runs_total 1"));
        assert!(content.contains("# TYPE weightgraph_dijkstra_runs_total counter"));
    }
}
