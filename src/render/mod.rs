//! 图的可视化输出
//!
//! 渲染器把图和一组标注（置灰的顶点和边、突出的顶点、线宽函数）转换成图表。
//! `DotRenderer` 只生成 Graphviz DOT 文本，不写文件也不调用 `dot`。

use crate::error::Result;
use crate::graph::{Edge, VertexId, WeightedGraph};
use crate::types::{GraphKind, VertexKey};
use std::collections::HashSet;
use std::fmt::{Display, Write};

/// 正常颜色
pub const BLACK: &str = "#000000ff";
/// 置灰颜色（半透明黑）
pub const GRAY: &str = "#00000080";

/// 线宽函数：边权重 -> penwidth
pub type WidthFn<'a> = Box<dyn Fn(f64) -> f64 + 'a>;

/// 一次渲染请求
pub struct RenderRequest<'a, K> {
    pub graph: &'a WeightedGraph<K>,
    pub greyed_vertices: HashSet<VertexId>,
    pub greyed_edges: HashSet<(VertexId, VertexId)>,
    pub highlighted: HashSet<VertexId>,
    /// 缺省时线宽等于权重
    pub width: Option<WidthFn<'a>>,
}

impl<'a, K: VertexKey> RenderRequest<'a, K> {
    pub fn new(graph: &'a WeightedGraph<K>) -> Self {
        Self {
            graph,
            greyed_vertices: HashSet::new(),
            greyed_edges: HashSet::new(),
            highlighted: HashSet::new(),
            width: None,
        }
    }

    /// 突出子图：不在 `sub` 中的顶点和边全部置灰
    ///
    /// 按键匹配，`sub` 的顶点编号可以与原图不同。
    pub fn with_subgraph(mut self, sub: &WeightedGraph<K>) -> Result<Self> {
        for (id, key) in self.graph.keys() {
            if !sub.contains(key) {
                self.greyed_vertices.insert(id);
            }
        }
        for e in self.graph.edges() {
            let a = self.graph.key(e.src())?;
            let b = self.graph.key(e.dst())?;
            if !sub.contains_edge(a, b) {
                self.greyed_edges.insert((e.src(), e.dst()));
            }
        }
        Ok(self)
    }

    pub fn grey_vertex(mut self, v: VertexId) -> Self {
        self.greyed_vertices.insert(v);
        self
    }

    pub fn grey_edge(mut self, src: VertexId, dst: VertexId) -> Self {
        self.greyed_edges.insert((src, dst));
        self
    }

    pub fn highlight(mut self, v: VertexId) -> Self {
        self.highlighted.insert(v);
        self
    }

    pub fn with_width<F>(mut self, width: F) -> Self
    where
        F: Fn(f64) -> f64 + 'a,
    {
        self.width = Some(Box::new(width));
        self
    }

    pub fn is_vertex_greyed(&self, v: VertexId) -> bool {
        self.greyed_vertices.contains(&v)
    }

    /// 无向图中不区分端点顺序
    pub fn is_edge_greyed(&self, e: &Edge) -> bool {
        let (src, dst) = e.endpoints();
        if self.greyed_edges.contains(&(src, dst)) {
            return true;
        }
        self.graph.kind() == GraphKind::Undirected && self.greyed_edges.contains(&(dst, src))
    }

    pub fn pen_width(&self, weight: f64) -> f64 {
        match &self.width {
            Some(f) => f(weight),
            None => weight,
        }
    }
}

/// 渲染器
pub trait GraphRenderer<K> {
    type Output;

    fn render(&mut self, request: &RenderRequest<'_, K>) -> Result<Self::Output>;
}

/// 图表名称生成器：graph00, graph01, ...
#[derive(Debug, Clone)]
pub struct RenderNamer {
    prefix: String,
    next: usize,
}

impl RenderNamer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    pub fn next_name(&mut self) -> String {
        let name = format!("{}{:02}", self.prefix, self.next);
        self.next += 1;
        name
    }
}

impl Default for RenderNamer {
    fn default() -> Self {
        Self::new("graph")
    }
}

/// 渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    pub name: String,
    pub source: String,
}

/// Graphviz DOT 渲染器
#[derive(Debug, Clone, Default)]
pub struct DotRenderer {
    namer: RenderNamer,
}

impl DotRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namer(namer: RenderNamer) -> Self {
        Self { namer }
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn weight_label(kind: GraphKind, weight: f64) -> String {
    match kind {
        GraphKind::Undirected => format!("{:.0}", weight),
        GraphKind::Directed => format!("{}", weight),
    }
}

impl<K: VertexKey + Display> GraphRenderer<K> for DotRenderer {
    type Output = Diagram;

    fn render(&mut self, request: &RenderRequest<'_, K>) -> Result<Diagram> {
        let graph = request.graph;
        let name = self.namer.next_name();
        let (keyword, arrow) = match graph.kind() {
            GraphKind::Undirected => ("graph", "--"),
            GraphKind::Directed => ("digraph", "->"),
        };

        // String 的 fmt::Write 不会失败
        let mut out = String::new();
        let _ = writeln!(out, "{} {} {{", keyword, name);

        for (id, key) in graph.keys() {
            let color = if request.is_vertex_greyed(id) { GRAY } else { BLACK };
            let style = if request.highlighted.contains(&id) {
                ", style=bold"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "    {} [color=\"{}\", fontcolor=\"{}\"{}];",
                quote(&key.to_string()),
                color,
                color,
                style
            );
        }

        for e in graph.edges() {
            let color = if request.is_edge_greyed(&e) { GRAY } else { BLACK };
            let _ = writeln!(
                out,
                "    {} {} {} [label=\"{}\", color=\"{}\", fontcolor=\"{}\", penwidth=\"{:.2}\"];",
                quote(&graph.key(e.src())?.to_string()),
                arrow,
                quote(&graph.key(e.dst())?.to_string()),
                weight_label(graph.kind(), e.weight()),
                color,
                color,
                request.pen_width(e.weight())
            );
        }
        out.push_str("}\n");

        tracing::debug!(
            name = %name,
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "生成 DOT"
        );
        Ok(Diagram { name, source: out })
    }
}
