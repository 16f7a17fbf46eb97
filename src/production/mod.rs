// ==========================================
// 汽车工厂生产线 - 生产规则层
// ==========================================
// 职责: 装配 / 拆解返修 / 报表，均为无状态服务
// 输入: 由调用方传入的 FactoryState
// 红线: 失败的操作不改变任何状态；报表只读
// ==========================================

pub mod assembly;
pub mod decommission;
pub mod error;
pub mod reporting;

// 重导出核心服务
pub use assembly::{validate_horsepower, AssemblyLine, CarOrder, EngineId, EngineOrder};
pub use decommission::DecommissionUnit;
pub use error::{ProductionError, ProductionResult};
pub use reporting::{PlanCompliance, PriceImpact, ReportingEngine};
