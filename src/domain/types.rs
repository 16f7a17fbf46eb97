// ==========================================
// 汽车工厂生产线 - 领域类型定义
// ==========================================
// 职责: 发动机品类 / 整车品类 / 装配用料要求
// 红线: 整车品类决定发动机品类 (装配时校验)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

// ==========================================
// 业务常量
// ==========================================

/// 力量型发动机马力允许范围
pub const HORSEPOWER_RANGE: RangeInclusive<u32> = 80..=4000;

/// Sport / DeLujo 座位数允许范围
pub const COUPE_SEATS_RANGE: RangeInclusive<u32> = 2..=4;

/// Formula1 固定座位数
pub const FORMULA1_SEATS: u32 = 1;

/// 每 10 马力 1 个座位 (Omnibus)
pub const HORSEPOWER_PER_SEAT: u32 = 10;

// ==========================================
// 发动机品类 (Engine Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineKind {
    HighPerformance, // 高性能
    Force,           // 力量型
    Work,            // 工作型
}

impl EngineKind {
    pub const ALL: [EngineKind; 3] = [EngineKind::HighPerformance, EngineKind::Force, EngineKind::Work];

    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::HighPerformance => "HIGH_PERFORMANCE",
            EngineKind::Force => "FORCE",
            EngineKind::Work => "WORK",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 整车品类 (Car Kind)
// ==========================================
// 顺序即报表输出顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarKind {
    Formula1, // 方程式赛车
    Omnibus,  // 大客车
    Sport,    // 跑车
    DeLujo,   // 豪华车
}

impl CarKind {
    pub const ALL: [CarKind; 4] = [CarKind::Formula1, CarKind::Omnibus, CarKind::Sport, CarKind::DeLujo];

    pub fn as_str(&self) -> &'static str {
        match self {
            CarKind::Formula1 => "FORMULA1",
            CarKind::Omnibus => "OMNIBUS",
            CarKind::Sport => "SPORT",
            CarKind::DeLujo => "DE_LUJO",
        }
    }

    /// 装配该品类所需的发动机
    pub fn engine_requirement(&self) -> EngineRequirement {
        match self {
            CarKind::Formula1 => EngineRequirement::Latest(EngineKind::HighPerformance),
            CarKind::Omnibus => EngineRequirement::Latest(EngineKind::Force),
            CarKind::Sport => EngineRequirement::Latest(EngineKind::Work),
            CarKind::DeLujo => EngineRequirement::Handcrafted,
        }
    }

    /// 是否参与返修降价分析 (DeLujo 不参与)
    pub fn tracks_reassembly_impact(&self) -> bool {
        !matches!(self, CarKind::DeLujo)
    }
}

impl fmt::Display for CarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 装配用料要求 (Engine Requirement)
// ==========================================
// Latest: 从对应品类库存中取最近入库的一台
// Handcrafted: 从工作型库存中取第一台手工打造的发动机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineRequirement {
    Latest(EngineKind),
    Handcrafted,
}

impl EngineRequirement {
    /// 满足该要求的发动机所在库存品类
    pub fn engine_kind(&self) -> EngineKind {
        match self {
            EngineRequirement::Latest(kind) => *kind,
            EngineRequirement::Handcrafted => EngineKind::Work,
        }
    }
}

impl fmt::Display for EngineRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineRequirement::Latest(kind) => write!(f, "{}", kind),
            EngineRequirement::Handcrafted => write!(f, "WORK(HANDCRAFTED)"),
        }
    }
}
