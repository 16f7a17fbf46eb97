// ==========================================
// 汽车工厂生产线 - 拆解返修单元
// ==========================================
// 职责: 未通过测试的整车拆解，发动机返修入库
// 输入: 发动机编码
// 输出: 发动机 reassembly_count +1 回到对应池；整车从登记簿移除
// 红线: 不可撤销；未命中时不改变任何状态
// ==========================================

use crate::domain::car::Car;
use crate::domain::engine::Engine;
use crate::production::error::{ProductionError, ProductionResult};
use crate::repository::factory_state::FactoryState;
use tracing::instrument;

pub struct DecommissionUnit {
    // 无状态引擎
}

impl DecommissionUnit {
    pub fn new() -> Self {
        Self {}
    }

    /// 拆解装有指定发动机的整车 (按装配顺序取第一台)
    ///
    /// # 返回
    /// - `Ok(Engine)`: 返修后入库的发动机快照
    /// - `Err(NotFound)`: 没有装有该发动机的整车
    #[instrument(skip(self, state))]
    pub fn decommission(&self, state: &mut FactoryState, engine_code: &str) -> ProductionResult<Engine> {
        let car = state
            .cars
            .position_by_engine_code(engine_code)
            .and_then(|index| state.cars.remove(index))
            .ok_or_else(|| {
                tracing::warn!("未找到装有该发动机的整车");
                ProductionError::NotFound {
                    engine_code: engine_code.to_string(),
                }
            })?;

        let car_id = car.id().to_string();
        let engine = strip_engine(car);
        let snapshot = engine.clone();
        state.inventory.add(engine);

        tracing::info!(
            %car_id,
            kind = %snapshot.kind(),
            reassembly_count = snapshot.reassembly_count(),
            tracked_engines = state.tracked_engines(),
            "整车已拆解，发动机返修入库"
        );
        Ok(snapshot)
    }
}

impl Default for DecommissionUnit {
    fn default() -> Self {
        Self::new()
    }
}

/// 拆车取出发动机并记一次返修；豪华车的发动机不再视为手工打造
fn strip_engine(car: Car) -> Engine {
    let was_de_lujo = matches!(car, Car::DeLujo(_));
    let mut engine = car.into_engine();

    let base = engine.base_mut();
    base.reassembly_count = base.reassembly_count.saturating_add(1);

    if was_de_lujo {
        if let Engine::Work(work) = &mut engine {
            work.handcrafted = false;
        }
    }
    engine
}
