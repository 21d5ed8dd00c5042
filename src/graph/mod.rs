//! 图核心模块
//!
//! 定义顶点、边和带权图的核心数据结构

pub mod builder;
mod edge;
mod graph;
mod index;
mod vertex;

pub use edge::Edge;
pub use graph::{Adjacency, WeightedGraph};
pub use index::VertexIndex;
pub use vertex::VertexId;
