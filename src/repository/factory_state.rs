// ==========================================
// 汽车工厂生产线 - 工厂状态聚合
// ==========================================
// 职责: 三个发动机池 + 整车登记簿 + 累计产量计数器
// 红线: 发动机要么在库存中，要么在且仅在一台整车中
// 红线: 累计产量只增不减 (拆解不回退)
// ==========================================

use crate::repository::car_registry::CarRegistry;
use crate::repository::inventory::EngineInventory;
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionCounters - 累计产量
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCounters {
    pub engines_produced: u64,
    pub cars_produced: u64,
}

impl ProductionCounters {
    pub fn record_engine(&mut self) {
        self.engines_produced = self.engines_produced.saturating_add(1);
    }

    pub fn record_car(&mut self) {
        self.cars_produced = self.cars_produced.saturating_add(1);
    }
}

// ==========================================
// FactoryState - 工厂状态
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactoryState {
    pub inventory: EngineInventory,
    pub cars: CarRegistry,
    pub counters: ProductionCounters,
}

impl FactoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前被跟踪的发动机总数 (库存 + 装车)
    pub fn tracked_engines(&self) -> usize {
        self.inventory.total() + self.cars.len()
    }
}
