// ==========================================
// 汽车工厂生产线 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换生产线/仓储错误为调用方可处理的结果
// 红线: 所有错误信息必须包含显式原因
// ==========================================

use crate::domain::error::ConfigurationError;
use crate::domain::types::EngineRequirement;
use crate::production::error::ProductionError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 生产线错误
    // ==========================================
    #[error("无可用发动机: {requirement}")]
    EngineUnavailable { requirement: EngineRequirement },

    #[error("配置非法: {0}")]
    InvalidConfiguration(ConfigurationError),

    /// entity 为稳定标识 (engine_car / car / action_log)，由展示层翻译
    #[error("资源未找到: {entity}(id={id})")]
    NotFound { entity: String, id: String },

    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 ProductionError 转换
// ==========================================
impl From<ProductionError> for ApiError {
    fn from(err: ProductionError) -> Self {
        match err {
            ProductionError::EngineUnavailable { requirement } => {
                ApiError::EngineUnavailable { requirement }
            }
            ProductionError::InvalidConfiguration(reason) => ApiError::InvalidConfiguration(reason),
            ProductionError::NotFound { engine_code } => ApiError::NotFound {
                entity: "engine_car".to_string(),
                id: engine_code,
            },
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => ApiError::NotFound { entity, id },
            RepositoryError::LockError(msg) => {
                ApiError::InternalError(format!("仓储锁获取失败: {}", msg))
            }
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
