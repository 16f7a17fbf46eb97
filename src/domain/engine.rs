// ==========================================
// 汽车工厂生产线 - 发动机领域模型
// ==========================================
// 职责: 三类发动机的值对象与成本公式
// 红线: reassembly_count 只由拆解返修递增
// 红线: 成本允许为负 (返修次数过多)，不做截断
// ==========================================

use crate::domain::sheet::{Describable, TechnicalSheet};
use crate::domain::types::EngineKind;
use serde::{Deserialize, Serialize};

/// 每返修一次的成本扣减
pub const REASSEMBLY_PENALTY: f64 = 100.0;

// ==========================================
// Trait: Costed
// ==========================================
// 纯函数，报表中会被推测性调用
pub trait Costed {
    fn compute_cost(&self) -> f64;
}

// ==========================================
// EngineBase - 发动机公共字段
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineBase {
    pub code: String,          // 发动机编码 (约定 12 位，不强制)
    pub release_date: String,  // 出厂日期 (约定 DD/MM/YYYY，不解析)
    pub specialist: String,    // 认证专员
    pub reassembly_count: u32, // 返修次数
}

impl EngineBase {
    pub fn new(
        code: impl Into<String>,
        release_date: impl Into<String>,
        specialist: impl Into<String>,
        reassembly_count: u32,
    ) -> Self {
        Self {
            code: code.into(),
            release_date: release_date.into(),
            specialist: specialist.into(),
            reassembly_count,
        }
    }

    fn reassembly_penalty(&self) -> f64 {
        REASSEMBLY_PENALTY * f64::from(self.reassembly_count)
    }

    fn sheet(&self, kind: EngineKind) -> TechnicalSheet {
        TechnicalSheet::new(kind.as_str())
            .field("code", self.code.as_str())
            .field("release_date", self.release_date.as_str())
            .field("specialist", self.specialist.as_str())
            .field("reassembly_count", self.reassembly_count)
    }
}

// ==========================================
// HighPerformanceEngine - 高性能发动机
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighPerformanceEngine {
    pub base: EngineBase,
    pub max_rpm: f64,             // 最高转速
    pub fuel_efficiency_km_l: f64, // 油耗 (km/L)
}

impl HighPerformanceEngine {
    pub fn new(base: EngineBase, max_rpm: f64, fuel_efficiency_km_l: f64) -> Self {
        Self {
            base,
            max_rpm,
            fuel_efficiency_km_l,
        }
    }
}

impl Costed for HighPerformanceEngine {
    /// maxRPM × 1.5 + 油耗 − 100 × 返修次数
    fn compute_cost(&self) -> f64 {
        self.max_rpm * 1.5 + self.fuel_efficiency_km_l - self.base.reassembly_penalty()
    }
}

impl Describable for HighPerformanceEngine {
    fn technical_sheet(&self) -> TechnicalSheet {
        self.base
            .sheet(EngineKind::HighPerformance)
            .field("max_rpm", self.max_rpm)
            .field("fuel_efficiency_km_l", self.fuel_efficiency_km_l)
            .field("cost", self.compute_cost())
    }
}

// ==========================================
// ForceEngine - 力量型发动机
// ==========================================
// 马力范围由入库接口校验，构造函数不校验
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceEngine {
    pub base: EngineBase,
    pub horsepower: u32,
}

impl ForceEngine {
    pub fn new(base: EngineBase, horsepower: u32) -> Self {
        Self { base, horsepower }
    }
}

impl Costed for ForceEngine {
    /// 马力 × (5 − 100 × 返修次数)
    fn compute_cost(&self) -> f64 {
        f64::from(self.horsepower) * (5.0 - self.base.reassembly_penalty())
    }
}

impl Describable for ForceEngine {
    fn technical_sheet(&self) -> TechnicalSheet {
        self.base
            .sheet(EngineKind::Force)
            .field("horsepower", self.horsepower)
            .field("cost", self.compute_cost())
    }
}

// ==========================================
// WorkEngine - 工作型发动机
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkEngine {
    pub base: EngineBase,
    pub handcrafted: bool, // 手工打造 (DeLujo 拆解后清除)
}

impl WorkEngine {
    pub fn new(base: EngineBase, handcrafted: bool) -> Self {
        Self { base, handcrafted }
    }
}

impl Costed for WorkEngine {
    /// (1000 − 100 × 返修次数)，手工打造 ×10
    fn compute_cost(&self) -> f64 {
        let cost = 1000.0 - self.base.reassembly_penalty();
        if self.handcrafted {
            cost * 10.0
        } else {
            cost
        }
    }
}

impl Describable for WorkEngine {
    fn technical_sheet(&self) -> TechnicalSheet {
        self.base
            .sheet(EngineKind::Work)
            .field("handcrafted", self.handcrafted)
            .field("cost", self.compute_cost())
    }
}

// ==========================================
// Engine - 发动机 (带品类标签)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Engine {
    HighPerformance(HighPerformanceEngine),
    Force(ForceEngine),
    Work(WorkEngine),
}

impl Engine {
    pub fn kind(&self) -> EngineKind {
        match self {
            Engine::HighPerformance(_) => EngineKind::HighPerformance,
            Engine::Force(_) => EngineKind::Force,
            Engine::Work(_) => EngineKind::Work,
        }
    }

    pub fn base(&self) -> &EngineBase {
        match self {
            Engine::HighPerformance(e) => &e.base,
            Engine::Force(e) => &e.base,
            Engine::Work(e) => &e.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut EngineBase {
        match self {
            Engine::HighPerformance(e) => &mut e.base,
            Engine::Force(e) => &mut e.base,
            Engine::Work(e) => &mut e.base,
        }
    }

    pub fn code(&self) -> &str {
        &self.base().code
    }

    pub fn reassembly_count(&self) -> u32 {
        self.base().reassembly_count
    }
}

impl Costed for Engine {
    fn compute_cost(&self) -> f64 {
        match self {
            Engine::HighPerformance(e) => e.compute_cost(),
            Engine::Force(e) => e.compute_cost(),
            Engine::Work(e) => e.compute_cost(),
        }
    }
}

impl Describable for Engine {
    fn technical_sheet(&self) -> TechnicalSheet {
        match self {
            Engine::HighPerformance(e) => e.technical_sheet(),
            Engine::Force(e) => e.technical_sheet(),
            Engine::Work(e) => e.technical_sheet(),
        }
    }
}

// ==========================================
// EngineSpec - 各品类专属字段 (入库请求)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineSpec {
    HighPerformance { max_rpm: f64, fuel_efficiency_km_l: f64 },
    Force { horsepower: u32 },
    Work { handcrafted: bool },
}

impl EngineSpec {
    pub fn kind(&self) -> EngineKind {
        match self {
            EngineSpec::HighPerformance { .. } => EngineKind::HighPerformance,
            EngineSpec::Force { .. } => EngineKind::Force,
            EngineSpec::Work { .. } => EngineKind::Work,
        }
    }

    /// 组装发动机值对象 (不做范围校验)
    pub fn build(self, base: EngineBase) -> Engine {
        match self {
            EngineSpec::HighPerformance { max_rpm, fuel_efficiency_km_l } => {
                Engine::HighPerformance(HighPerformanceEngine::new(base, max_rpm, fuel_efficiency_km_l))
            }
            EngineSpec::Force { horsepower } => Engine::Force(ForceEngine::new(base, horsepower)),
            EngineSpec::Work { handcrafted } => Engine::Work(WorkEngine::new(base, handcrafted)),
        }
    }
}

impl From<HighPerformanceEngine> for Engine {
    fn from(engine: HighPerformanceEngine) -> Self {
        Engine::HighPerformance(engine)
    }
}

impl From<ForceEngine> for Engine {
    fn from(engine: ForceEngine) -> Self {
        Engine::Force(engine)
    }
}

impl From<WorkEngine> for Engine {
    fn from(engine: WorkEngine) -> Self {
        Engine::Work(engine)
    }
}
