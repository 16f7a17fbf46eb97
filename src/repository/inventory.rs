// ==========================================
// 汽车工厂生产线 - 发动机库存
// ==========================================
// 职责: 三个按品类划分的待装配发动机池
// 出库顺序: 后进先出；手工打造发动机取池中第一台
// 红线: 取不到发动机是正常结果 (None)，不是错误
// ==========================================

use crate::domain::engine::{Engine, ForceEngine, HighPerformanceEngine, WorkEngine};
use crate::domain::types::{EngineKind, EngineRequirement};
use serde::{Deserialize, Serialize};

/// 出库时发动机所在的槽位 (用于原位退回)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    index: usize,
}

impl Slot {
    pub fn index(&self) -> usize {
        self.index
    }
}

// ==========================================
// EngineInventory - 发动机库存
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineInventory {
    pub high_performance: Vec<HighPerformanceEngine>,
    pub force: Vec<ForceEngine>,
    pub work: Vec<WorkEngine>,
}

impl EngineInventory {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 按品类入池 (追加到末尾)
    pub fn add(&mut self, engine: Engine) {
        match engine {
            Engine::HighPerformance(e) => self.high_performance.push(e),
            Engine::Force(e) => self.force.push(e),
            Engine::Work(e) => self.work.push(e),
        }
    }

    /// 取出指定品类最近入库的一台
    pub fn take_latest(&mut self, kind: EngineKind) -> Option<Engine> {
        self.withdraw(EngineRequirement::Latest(kind)).map(|(engine, _)| engine)
    }

    /// 取出工作型池中第一台手工打造的发动机，其余顺序不变
    pub fn take_handcrafted(&mut self) -> Option<WorkEngine> {
        match self.withdraw(EngineRequirement::Handcrafted)? {
            (Engine::Work(engine), _) => Some(engine),
            (other, slot) => {
                self.restore(other, slot);
                None
            }
        }
    }

    /// 按装配要求出库
    pub fn withdraw(&mut self, requirement: EngineRequirement) -> Option<(Engine, Slot)> {
        match requirement {
            EngineRequirement::Latest(EngineKind::HighPerformance) => {
                let engine = self.high_performance.pop()?;
                let slot = Slot { index: self.high_performance.len() };
                Some((Engine::HighPerformance(engine), slot))
            }
            EngineRequirement::Latest(EngineKind::Force) => {
                let engine = self.force.pop()?;
                let slot = Slot { index: self.force.len() };
                Some((Engine::Force(engine), slot))
            }
            EngineRequirement::Latest(EngineKind::Work) => {
                let engine = self.work.pop()?;
                let slot = Slot { index: self.work.len() };
                Some((Engine::Work(engine), slot))
            }
            EngineRequirement::Handcrafted => {
                let index = self.work.iter().position(|e| e.handcrafted)?;
                let engine = self.work.remove(index);
                Some((Engine::Work(engine), Slot { index }))
            }
        }
    }

    /// 原位退回 (撤销一次出库)
    pub fn restore(&mut self, engine: Engine, slot: Slot) {
        match engine {
            Engine::HighPerformance(e) => {
                let index = slot.index.min(self.high_performance.len());
                self.high_performance.insert(index, e);
            }
            Engine::Force(e) => {
                let index = slot.index.min(self.force.len());
                self.force.insert(index, e);
            }
            Engine::Work(e) => {
                let index = slot.index.min(self.work.len());
                self.work.insert(index, e);
            }
        }
    }

    // ==========================================
    // 查询操作
    // ==========================================

    pub fn count(&self, kind: EngineKind) -> usize {
        match kind {
            EngineKind::HighPerformance => self.high_performance.len(),
            EngineKind::Force => self.force.len(),
            EngineKind::Work => self.work.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.high_performance.len() + self.force.len() + self.work.len()
    }
}
