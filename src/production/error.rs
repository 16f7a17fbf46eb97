// ==========================================
// 汽车工厂生产线 - 生产线错误类型
// ==========================================
// 分类: 无库存 / 字段配置非法 / 拆解目标不存在
// 说明: 均为调用方可处理的结果，失败时状态不变
// ==========================================

use crate::domain::error::ConfigurationError;
use crate::domain::types::EngineRequirement;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProductionError {
    #[error("无可用发动机: requirement={requirement}")]
    EngineUnavailable { requirement: EngineRequirement },

    #[error("配置非法: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),

    #[error("未找到装有该发动机的整车: engine_code={engine_code}")]
    NotFound { engine_code: String },
}

/// Result 类型别名
pub type ProductionResult<T> = Result<T, ProductionError>;
