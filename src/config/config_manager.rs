// ==========================================
// 汽车工厂生产线 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: 内存 key-value，可选从 JSON 文件加载
// 红线: 配置值解析失败时回退默认值并告警，不中断启动
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::factory_config::{
    FactoryConfig, DEFAULT_ANNUAL_CAR_PLAN, DEFAULT_ANNUAL_ENGINE_PLAN,
    DEFAULT_HIGH_SPEED_THRESHOLD_KMH,
};
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "CAR_FACTORY_CONFIG";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    values: Mutex<HashMap<String, String>>,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 创建空的 ConfigManager (全部使用默认值)
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            source: None,
        }
    }

    /// 从 JSON 文件加载配置
    ///
    /// # 说明
    /// - 文件不存在: 返回空配置 (全部默认值)
    /// - 文件须为 JSON 对象；非字符串值按 JSON 文本保存
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let path_label = path.display().to_string();

        if !path.exists() {
            tracing::info!(path = %path_label, "配置文件不存在，使用默认配置");
            return Ok(Self {
                values: Mutex::new(HashMap::new()),
                source: Some(path.to_path_buf()),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path_label.clone(),
            source,
        })?;
        let parsed: HashMap<String, JsonValue> =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path_label.clone(),
                source,
            })?;

        let values: HashMap<String, String> = parsed
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    JsonValue::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect();

        tracing::info!(path = %path_label, keys = values.len(), "配置文件加载完成");
        Ok(Self {
            values: Mutex::new(values),
            source: Some(path.to_path_buf()),
        })
    }

    /// 从默认路径加载
    pub fn load_default() -> ConfigResult<Self> {
        Self::from_file(&get_default_config_path())
    }

    /// 配置来源文件 (若有)
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 读取配置值
    pub fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr + Copy,
    {
        let Some(raw) = self.get_config_value(key)? else {
            return Ok(default);
        };
        Ok(raw.trim().parse::<T>().unwrap_or_else(|_| {
            tracing::warn!(config_key = key, raw_value = %raw, "配置值格式错误，使用默认值");
            default
        }))
    }

    /// 覆写配置值
    pub fn update_config(&self, key: &str, value: &str) -> ConfigResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;
        let old = values.insert(key.to_string(), value.to_string());
        tracing::info!(config_key = key, old_value = ?old, new_value = value, "配置已更新");
        Ok(())
    }

    /// 获取所有配置的快照（JSON格式，按 key 排序）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let values = self
            .values
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;
        let ordered: BTreeMap<&String, &String> = values.iter().collect();
        Ok(serde_json::to_string(&ordered)?)
    }

    // ===== 计划与报表配置 =====

    pub fn get_annual_engine_plan(&self) -> ConfigResult<u64> {
        self.get_parsed_or_default(config_keys::ANNUAL_ENGINE_PLAN, DEFAULT_ANNUAL_ENGINE_PLAN)
    }

    pub fn get_annual_car_plan(&self) -> ConfigResult<u64> {
        self.get_parsed_or_default(config_keys::ANNUAL_CAR_PLAN, DEFAULT_ANNUAL_CAR_PLAN)
    }

    pub fn get_high_speed_threshold_kmh(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(
            config_keys::HIGH_SPEED_THRESHOLD_KMH,
            DEFAULT_HIGH_SPEED_THRESHOLD_KMH,
        )
    }

    /// 汇总为 FactoryConfig
    ///
    /// # 校验
    /// - 年度计划必须 > 0
    /// - 阈值必须为有限数
    pub fn to_factory_config(&self) -> ConfigResult<FactoryConfig> {
        let annual_engine_plan = self.get_annual_engine_plan()?;
        let annual_car_plan = self.get_annual_car_plan()?;
        let high_speed_threshold_kmh = self.get_high_speed_threshold_kmh()?;

        for (key, plan) in [
            (config_keys::ANNUAL_ENGINE_PLAN, annual_engine_plan),
            (config_keys::ANNUAL_CAR_PLAN, annual_car_plan),
        ] {
            if plan == 0 {
                return Err(ConfigError::Invalid {
                    key: key.to_string(),
                    value: plan.to_string(),
                    reason: "年度计划必须大于 0".to_string(),
                });
            }
        }
        if !high_speed_threshold_kmh.is_finite() {
            return Err(ConfigError::Invalid {
                key: config_keys::HIGH_SPEED_THRESHOLD_KMH.to_string(),
                value: high_speed_threshold_kmh.to_string(),
                reason: "阈值必须为有限数".to_string(),
            });
        }

        Ok(FactoryConfig {
            annual_engine_plan,
            annual_car_plan,
            high_speed_threshold_kmh,
        })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// 默认配置文件路径
///
/// 优先 `CAR_FACTORY_CONFIG`，否则 `<config_dir>/car-factory/config.json`
pub fn get_default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = path.trim();
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("car-factory")
        .join("config.json")
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 年度计划
    pub const ANNUAL_ENGINE_PLAN: &str = "annual_engine_plan";
    pub const ANNUAL_CAR_PLAN: &str = "annual_car_plan";

    // 报表
    pub const HIGH_SPEED_THRESHOLD_KMH: &str = "high_speed_threshold_kmh";
}
