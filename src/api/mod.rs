// ==========================================
// 汽车工厂生产线 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供控制台菜单调用
// ==========================================

pub mod error;
pub mod factory_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use factory_api::{AvailableEngines, EnginePool, FactoryApi};
