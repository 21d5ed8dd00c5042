//! 日志初始化

use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// 安装全局 fmt 订阅者
///
/// `RUST_LOG` 优先于 `level`。已经安装过订阅者时直接返回。
pub fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| Error::ConfigError(format!("无效的日志级别 {}: {}", level, e)))?,
    };

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_err()
    {
        tracing::debug!("日志订阅者已存在");
    }
    Ok(())
}
