// ==========================================
// 汽车工厂生产线 - 装配线
// ==========================================
// 职责: 发动机入库 + 整车装配
// 输入: 已解析的入库/装配请求 + FactoryState
// 输出: 更新库存 / 登记簿 / 累计产量
// 红线: 失败时不改变任何状态 (含被拒绝后原位退回的发动机)
// ==========================================

use crate::domain::car::{Car, CarHeader, CarSpec};
use crate::domain::engine::{EngineBase, EngineSpec};
use crate::domain::error::{validate_positive, ConfigurationError};
use crate::domain::types::HORSEPOWER_RANGE;
use crate::production::error::{ProductionError, ProductionResult};
use crate::repository::factory_state::FactoryState;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 发动机ID (即发动机编码)
pub type EngineId = String;

// ==========================================
// 请求对象
// ==========================================

/// 发动机入库请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOrder {
    pub code: String,
    pub release_date: String,
    pub specialist: String,
    pub reassembly_count: u32,
    pub spec: EngineSpec,
}

/// 整车装配请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarOrder {
    pub release_date: String,
    pub top_speed_kmh: f64,
    pub spec: CarSpec,
}

// ==========================================
// AssemblyLine - 装配线
// ==========================================
pub struct AssemblyLine {
    // 无状态引擎，状态由调用方传入
}

impl AssemblyLine {
    pub fn new() -> Self {
        Self {}
    }

    /// 发动机入库
    ///
    /// 力量型发动机马力须在 [80, 4000]，高性能发动机转速与油耗须为正数；
    /// 校验失败时不入库、不计产量
    #[instrument(skip(self, state, order), fields(code = %order.code, kind = %order.spec.kind()))]
    pub fn add_engine(&self, state: &mut FactoryState, order: EngineOrder) -> ProductionResult<EngineId> {
        match order.spec {
            EngineSpec::Force { horsepower } => {
                validate_horsepower(horsepower)?;
            }
            EngineSpec::HighPerformance { max_rpm, fuel_efficiency_km_l } => {
                validate_positive("max_rpm", max_rpm)?;
                validate_positive("fuel_efficiency_km_l", fuel_efficiency_km_l)?;
            }
            EngineSpec::Work { .. } => {}
        }

        let base = EngineBase::new(
            order.code,
            order.release_date,
            order.specialist,
            order.reassembly_count,
        );
        let engine = order.spec.build(base);
        let engine_id = engine.code().to_string();

        state.inventory.add(engine);
        state.counters.record_engine();

        tracing::info!(
            engines_produced = state.counters.engines_produced,
            tracked_engines = state.tracked_engines(),
            "发动机入库"
        );
        Ok(engine_id)
    }

    /// 整车装配
    ///
    /// 步骤:
    /// 1) 按整车品类确定用料要求
    /// 2) 出库；无库存返回 EngineUnavailable
    /// 3) 构造整车；字段非法返回 InvalidConfiguration，发动机原位退回
    /// 4) 登记整车，累计产量 +1
    #[instrument(skip(self, state, order), fields(kind = %order.spec.kind()))]
    pub fn assemble(&self, state: &mut FactoryState, order: CarOrder) -> ProductionResult<Car> {
        let requirement = order.spec.kind().engine_requirement();

        let (engine, slot) = match state.inventory.withdraw(requirement) {
            Some(withdrawn) => withdrawn,
            None => {
                tracing::warn!(%requirement, "无可用发动机，放弃装配");
                return Err(ProductionError::EngineUnavailable { requirement });
            }
        };

        let header = CarHeader::new(order.release_date, order.top_speed_kmh);
        let car = match Car::assemble(header, engine, order.spec) {
            Ok(car) => car,
            Err(rejected) => {
                tracing::warn!(
                    engine_code = %rejected.engine.code(),
                    reason = %rejected.reason,
                    "装配被拒绝，发动机退回库存"
                );
                state.inventory.restore(rejected.engine, slot);
                return Err(ProductionError::InvalidConfiguration(rejected.reason));
            }
        };

        state.cars.push(car.clone());
        state.counters.record_car();

        tracing::info!(
            car_id = %car.id(),
            engine_code = %car.engine_code(),
            cars_produced = state.counters.cars_produced,
            tracked_engines = state.tracked_engines(),
            "整车装配完成"
        );
        Ok(car)
    }
}

impl Default for AssemblyLine {
    fn default() -> Self {
        Self::new()
    }
}

/// 马力范围校验
pub fn validate_horsepower(horsepower: u32) -> Result<u32, ConfigurationError> {
    if HORSEPOWER_RANGE.contains(&horsepower) {
        Ok(horsepower)
    } else {
        Err(ConfigurationError::HorsepowerOutOfRange {
            value: horsepower,
            min: *HORSEPOWER_RANGE.start(),
            max: *HORSEPOWER_RANGE.end(),
        })
    }
}
