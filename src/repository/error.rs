// ==========================================
// 汽车工厂生产线 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("仓储锁获取失败: {0}")]
    LockError(String),
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
