//! 错误类型定义

use crate::types::GraphKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("无效的边权重: {0}")]
    InvalidWeight(String),

    #[error("存在负权边: {from} -> {to}, 权重 {weight}")]
    NegativeWeight {
        from: String,
        to: String,
        weight: f64,
    },

    #[error("划分后两侧之间没有连接边: 左侧 {left} 个顶点, 右侧 {right} 个顶点")]
    DisconnectedPartition { left: usize, right: usize },

    #[error("顶点不存在: {0}")]
    UnknownVertex(String),

    #[error("图类型不匹配: 期望 {expected}, 实际 {found}")]
    KindMismatch { expected: GraphKind, found: GraphKind },

    #[error("无效的预算: {0}")]
    InvalidBudget(f64),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
