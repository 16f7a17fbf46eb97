// ==========================================
// 汽车工厂生产线 - 配置层
// ==========================================
// 职责: 年度计划与报表阈值的加载、覆写、快照
// 存储: 可选 JSON 文件 (CAR_FACTORY_CONFIG)
// ==========================================

pub mod config_manager;
pub mod error;
pub mod factory_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, get_default_config_path, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use factory_config::FactoryConfig;
