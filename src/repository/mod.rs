// ==========================================
// 汽车工厂生产线 - 数据仓储层
// ==========================================
// 职责: 内存中的库存 / 登记簿 / 计数器 / 操作日志
// 红线: 不含业务规则 (配对校验、返修处理均在 production 层)
// ==========================================

pub mod action_log_repo;
pub mod car_registry;
pub mod error;
pub mod factory_state;
pub mod inventory;

// 重导出核心类型
pub use action_log_repo::ActionLogRepository;
pub use car_registry::CarRegistry;
pub use error::{RepositoryError, RepositoryResult};
pub use factory_state::{FactoryState, ProductionCounters};
pub use inventory::{EngineInventory, Slot};
