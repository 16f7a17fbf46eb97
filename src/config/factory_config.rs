use serde::{Deserialize, Serialize};

/// 年度发动机计划 (台)
pub const DEFAULT_ANNUAL_ENGINE_PLAN: u64 = 1000;
/// 年度整车计划 (台)
pub const DEFAULT_ANNUAL_CAR_PLAN: u64 = 500;
/// 高速车报表的默认时速阈值 (km/h)
pub const DEFAULT_HIGH_SPEED_THRESHOLD_KMH: f64 = 150.0;

/// 工厂运行参数（由 ConfigManager 解析得到）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoryConfig {
    /// 年度发动机计划
    #[serde(default = "default_annual_engine_plan")]
    pub annual_engine_plan: u64,

    /// 年度整车计划
    #[serde(default = "default_annual_car_plan")]
    pub annual_car_plan: u64,

    /// 高速车阈值（严格大于）
    #[serde(default = "default_high_speed_threshold_kmh")]
    pub high_speed_threshold_kmh: f64,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            annual_engine_plan: DEFAULT_ANNUAL_ENGINE_PLAN,
            annual_car_plan: DEFAULT_ANNUAL_CAR_PLAN,
            high_speed_threshold_kmh: DEFAULT_HIGH_SPEED_THRESHOLD_KMH,
        }
    }
}

fn default_annual_engine_plan() -> u64 {
    DEFAULT_ANNUAL_ENGINE_PLAN
}

fn default_annual_car_plan() -> u64 {
    DEFAULT_ANNUAL_CAR_PLAN
}

fn default_high_speed_threshold_kmh() -> f64 {
    DEFAULT_HIGH_SPEED_THRESHOLD_KMH
}
