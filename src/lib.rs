// ==========================================
// 汽车工厂生产线 - 核心库
// ==========================================
// 职责: 发动机库存 / 整车装配 / 拆解返修 / 经营报表
// 系统定位: 单进程内存状态机，控制台为唯一外部调用方
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 内存存储
pub mod repository;

// 生产规则层 - 装配/拆解/报表
pub mod production;

// 配置层 - 年度计划与阈值
pub mod config;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 控制台
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CarKind, EngineKind, EngineRequirement};

// 领域实体
pub use domain::{
    ActionLog, ActionType, Car, CarSpec, ConfigurationError, Costed, Describable, Engine,
    EngineSpec, PricedSaleable, TechnicalSheet,
};

// 生产规则
pub use production::{
    AssemblyLine, CarOrder, DecommissionUnit, EngineOrder, PlanCompliance, PriceImpact,
    ProductionError, ReportingEngine,
};

// API
pub use api::{ApiError, ApiResult, FactoryApi};

// 配置
pub use config::{ConfigManager, FactoryConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "汽车工厂生产线";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
