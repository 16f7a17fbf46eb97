// ==========================================
// 汽车工厂生产线 - 领域层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::types::{CarKind, EngineKind};
use thiserror::Error;

/// 字段配置错误 (参数越界 / 品类不匹配)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("马力超出允许范围: value={value}, 允许范围=[{min}, {max}]")]
    HorsepowerOutOfRange { value: u32, min: u32, max: u32 },

    #[error("座位数超出允许范围: value={value}, 允许范围=[{min}, {max}]")]
    SeatsOutOfRange { value: u32, min: u32, max: u32 },

    #[error("发动机品类不匹配: car={car} 不能使用 engine={engine}")]
    EngineMismatch { car: CarKind, engine: EngineKind },

    #[error("发动机非手工打造: engine_code={engine_code}")]
    EngineNotHandcrafted { engine_code: String },

    #[error("数值必须为正的有限数: field={field}, value={value}")]
    NonPositive { field: &'static str, value: f64 },
}

/// 正数校验 (NaN / 无穷 / ≤0 均拒绝)
pub fn validate_positive(field: &'static str, value: f64) -> Result<f64, ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigurationError::NonPositive { field, value })
    }
}

/// 被拒绝的装配
///
/// 构造失败时发动机所有权随错误一并交还调用方，不会丢失
#[derive(Debug)]
pub struct Rejected<E> {
    pub reason: ConfigurationError,
    pub engine: E,
}

impl<E> Rejected<E> {
    pub fn new(reason: ConfigurationError, engine: E) -> Self {
        Self { reason, engine }
    }

    /// 转换发动机类型 (例如 WorkEngine -> Engine)
    pub fn map_engine<F, T>(self, f: F) -> Rejected<T>
    where
        F: FnOnce(E) -> T,
    {
        Rejected {
            reason: self.reason,
            engine: f(self.engine),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert_eq!(validate_positive("max_rpm", 0.5), Ok(0.5));

        for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = validate_positive("max_rpm", value).unwrap_err();
            assert!(
                matches!(err, ConfigurationError::NonPositive { field: "max_rpm", .. }),
                "{} 应被拒绝",
                value
            );
        }
    }
}
