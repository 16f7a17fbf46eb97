// ==========================================
// 汽车工厂生产线 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、业务规则接口
// 红线: 不含存储逻辑,不含生产线规则
// ==========================================

pub mod action_log;
pub mod car;
pub mod engine;
pub mod error;
pub mod sheet;
pub mod types;

// 重导出核心类型
pub use action_log::{ActionLog, ActionType};
pub use car::{
    validate_coupe_seats, Car, CarBase, CarHeader, CarId, CarSpec, DeLujo, Formula1, Omnibus,
    PricedSaleable, Sport,
};
pub use engine::{
    Costed, Engine, EngineBase, EngineSpec, ForceEngine, HighPerformanceEngine, WorkEngine,
};
pub use error::{validate_positive, ConfigurationError, Rejected};
pub use sheet::{Describable, SheetField, TechnicalSheet};
pub use types::{CarKind, EngineKind, EngineRequirement};
