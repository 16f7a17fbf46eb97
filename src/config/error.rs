// ==========================================
// 汽车工厂生产线 - 配置层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误: {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置项非法: {key}={value} ({reason})")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },

    #[error("配置快照序列化失败: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("锁获取失败: {0}")]
    LockError(String),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
