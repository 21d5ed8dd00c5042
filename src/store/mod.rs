//! 随机测试图的生成与持久化
//!
//! 测试图是有向图，顶点为 `v0..v{size-1}`，另带一对起点和终点。
//! 落盘格式为 JSON：`{size, start, end, edges: [[i, j, weight], ...]}`。

use crate::config::Config;
use crate::error::{Error, Result};
use crate::graph::{VertexId, WeightedGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// 测试图的顶点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TestVertex(pub usize);

impl fmt::Display for TestVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// 可序列化的测试图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestGraphState {
    pub size: usize,
    pub start: usize,
    pub end: usize,
    pub edges: Vec<(usize, usize, f64)>,
}

impl TestGraphState {
    /// 随机生成
    ///
    /// 每个有序对 `(i, j)`（`i != j`）以 `density` 的概率成边，
    /// 权重取 `[0, size)` 内保留两位小数的随机数。起点编号不大于终点。
    pub fn random<R: Rng + ?Sized>(size: usize, density: f64, rng: &mut R) -> Result<Self> {
        if size == 0 {
            return Err(Error::ConfigError("测试图至少需要一个顶点".to_string()));
        }
        if !(0.0..=1.0).contains(&density) {
            return Err(Error::ConfigError(format!(
                "边密度必须在 [0, 1] 之间: {}",
                density
            )));
        }

        let mut edges = Vec::new();
        for i in 0..size {
            for j in 0..size {
                if i != j && rng.gen::<f64>() < density {
                    let weight = (size as f64 * rng.gen::<f64>() * 100.0).round() / 100.0;
                    edges.push((i, j, weight));
                }
            }
        }

        let a = rng.gen_range(0..size);
        let b = rng.gen_range(0..size);
        Ok(Self {
            size,
            start: a.min(b),
            end: a.max(b),
            edges,
        })
    }

    /// 构造图，校验所有编号都在 `0..size` 内
    pub fn build(&self) -> Result<TestGraph> {
        let out_of_range = |n: usize| n >= self.size;
        if out_of_range(self.start) || out_of_range(self.end) {
            return Err(Error::SerializationError(format!(
                "起点或终点越界: start={}, end={}, size={}",
                self.start, self.end, self.size
            )));
        }

        let mut graph = WeightedGraph::directed();
        for i in 0..self.size {
            graph.node(TestVertex(i));
        }
        for &(i, j, weight) in &self.edges {
            if out_of_range(i) || out_of_range(j) {
                return Err(Error::SerializationError(format!(
                    "边 ({}, {}) 的端点越界, size={}",
                    i, j, self.size
                )));
            }
            graph.edge(TestVertex(i), TestVertex(j), weight)?;
        }

        // 顶点按 0..size 顺序插入，编号即下标
        Ok(TestGraph {
            graph,
            start: VertexId::new(self.start),
            end: VertexId::new(self.end),
        })
    }
}

/// 带起点和终点的测试图
#[derive(Debug, Clone)]
pub struct TestGraph {
    pub graph: WeightedGraph<TestVertex>,
    pub start: VertexId,
    pub end: VertexId,
}

impl TestGraph {
    pub fn size(&self) -> usize {
        self.graph.vertex_count()
    }

    /// 导出为可序列化状态
    pub fn to_state(&self) -> Result<TestGraphState> {
        let mut edges = Vec::with_capacity(self.graph.edge_count());
        for e in self.graph.edges() {
            let a = self.graph.key(e.src())?;
            let b = self.graph.key(e.dst())?;
            edges.push((a.0, b.0, e.weight()));
        }
        Ok(TestGraphState {
            size: self.size(),
            start: self.graph.key(self.start)?.0,
            end: self.graph.key(self.end)?.0,
            edges,
        })
    }
}

/// 测试图存储
pub trait GraphStore {
    /// 读取已保存的同规模测试图，没有则生成新的并保存
    fn load_or_generate(&self, size: usize, density: f64) -> Result<TestGraph>;
}

/// 以 JSON 文件保存测试图
#[derive(Debug, Clone)]
pub struct JsonGraphStore {
    path: PathBuf,
    seed: Option<u64>,
}

impl JsonGraphStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            seed: None,
        }
    }

    /// 固定随机种子，生成结果可复现
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            path: config.store_path.clone(),
            seed: config.seed,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取文件，不存在时返回 None
    pub fn load(&self) -> Result<Option<TestGraphState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let state = serde_json::from_str(&content)?;
        Ok(Some(state))
    }

    pub fn save(&self, state: &TestGraphState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl GraphStore for JsonGraphStore {
    fn load_or_generate(&self, size: usize, density: f64) -> Result<TestGraph> {
        if let Some(state) = self.load()? {
            if state.size == size {
                tracing::debug!(path = %self.path.display(), size, "读取已保存的测试图");
                return state.build();
            }
            tracing::info!(
                path = %self.path.display(),
                saved = state.size,
                requested = size,
                "测试图规模不符，重新生成"
            );
        }

        let state = TestGraphState::random(size, density, &mut self.rng())?;
        let test = state.build()?;
        self.save(&state)?;
        tracing::info!(
            path = %self.path.display(),
            size,
            edges = state.edges.len(),
            "生成测试图"
        );
        Ok(test)
    }
}
