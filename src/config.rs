//! 配置管理
//!
//! 配置文件为 JSON，缺省字段取默认值

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 测试图文件
    pub store_path: PathBuf,
    /// 测试图顶点数
    pub test_size: usize,
    /// 测试图边密度
    pub test_density: f64,
    /// 随机种子，缺省时每次生成都不同
    pub seed: Option<u64>,
    /// 日志级别 (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("test_graph.json"),
            test_size: 10,
            test_density: 0.3,
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// 从文件读取并校验
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 文件不存在时使用默认配置
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.test_size == 0 {
            return Err(Error::ConfigError("test_size 必须大于 0".to_string()));
        }
        if !(0.0..=1.0).contains(&self.test_density) {
            return Err(Error::ConfigError(format!(
                "test_density 必须在 [0, 1] 之间: {}",
                self.test_density
            )));
        }
        Ok(())
    }
}
