// ==========================================
// 汽车工厂生产线 - 报表引擎
// ==========================================
// 职责: 基于当前登记簿/计数器的只读汇总
// 输入: 整车切片 / 累计产量 / 年度计划
// 输出: 筛选序列、返修降价、计划达成率、分品类利润
// 红线: 纯读取；返修降价试算在克隆副本上进行，不触碰共享状态
// ==========================================

use crate::domain::car::{Car, PricedSaleable};
use crate::domain::types::CarKind;
use crate::repository::factory_state::ProductionCounters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

// ==========================================
// 报表结果
// ==========================================

/// 返修对售价的影响
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceImpact {
    pub car_id: String,
    pub kind: CarKind,
    pub engine_code: String,
    pub reassembly_count: u32,
    pub current_price: f64,
    pub previous_price: f64, // 少返修一次时的售价
    pub delta: f64,          // previous_price − current_price
}

/// 年度计划达成率 (百分比)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanCompliance {
    pub engine_percent: f64,
    pub car_percent: f64,
}

// ==========================================
// ReportingEngine - 报表引擎
// ==========================================
pub struct ReportingEngine {
    // 无状态引擎
}

impl ReportingEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 最高时速超过阈值的整车 (登记顺序，惰性且可重复遍历)
    pub fn high_speed_cars<'a>(
        &self,
        cars: &'a [Car],
        threshold_kmh: f64,
    ) -> impl Iterator<Item = &'a Car> + Clone + 'a {
        cars.iter().filter(move |car| car.top_speed_kmh() > threshold_kmh)
    }

    /// 座位最多的大客车；并列时取先登记者
    pub fn largest_omnibus<'a>(&self, cars: &'a [Car]) -> Option<&'a Car> {
        let mut largest: Option<&Car> = None;
        for car in cars.iter().filter(|car| car.kind() == CarKind::Omnibus) {
            match largest {
                Some(current) if car.seats() <= current.seats() => {}
                _ => largest = Some(car),
            }
        }
        largest
    }

    /// 返修降价试算
    ///
    /// 仅统计 Formula1 / Omnibus / Sport 且发动机返修次数 > 0 的整车
    #[instrument(skip(self, cars), fields(car_count = cars.len()))]
    pub fn reassembled_price_impact(&self, cars: &[Car]) -> Vec<PriceImpact> {
        let impacts: Vec<PriceImpact> = cars
            .iter()
            .filter(|car| car.kind().tracks_reassembly_impact())
            .filter(|car| car.engine_base().reassembly_count > 0)
            .map(|car| {
                let current_price = car.sale_price();
                let previous_price = price_with_one_less_reassembly(car);
                PriceImpact {
                    car_id: car.id().to_string(),
                    kind: car.kind(),
                    engine_code: car.engine_code().to_string(),
                    reassembly_count: car.engine_base().reassembly_count,
                    current_price,
                    previous_price,
                    delta: previous_price - current_price,
                }
            })
            .collect();

        tracing::debug!(impacted = impacts.len(), "返修降价试算完成");
        impacts
    }

    /// 年度计划达成率；计划为 0 时记为 0
    pub fn plan_compliance(
        &self,
        counters: &ProductionCounters,
        annual_engine_plan: u64,
        annual_car_plan: u64,
    ) -> PlanCompliance {
        PlanCompliance {
            engine_percent: percent(counters.engines_produced, annual_engine_plan),
            car_percent: percent(counters.cars_produced, annual_car_plan),
        }
    }

    /// 分品类利润 (售价 − 发动机成本)，四个品类均有条目
    pub fn profit_by_variant(&self, cars: &[Car]) -> BTreeMap<CarKind, f64> {
        let mut profits: BTreeMap<CarKind, f64> = CarKind::ALL.iter().map(|kind| (*kind, 0.0)).collect();
        for car in cars {
            *profits.entry(car.kind()).or_insert(0.0) += car.profit();
        }
        profits
    }
}

impl Default for ReportingEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn price_with_one_less_reassembly(car: &Car) -> f64 {
    let mut probe = car.clone();
    let base = probe.engine_base_mut();
    base.reassembly_count = base.reassembly_count.saturating_sub(1);
    probe.sale_price()
}

fn percent(produced: u64, plan: u64) -> f64 {
    if plan == 0 {
        return 0.0;
    }
    produced as f64 / plan as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::car::CarHeader;
    use crate::domain::car::CarSpec;
    use crate::domain::engine::{Engine, EngineBase, ForceEngine, HighPerformanceEngine, WorkEngine};

    fn force_bus(horsepower: u32, top_speed_kmh: f64, reassembly_count: u32) -> Car {
        let engine = Engine::from(ForceEngine::new(
            EngineBase::new(format!("FO{horsepower}"), "01/02/2024", "Rosa", reassembly_count),
            horsepower,
        ));
        Car::assemble(CarHeader::new("02/02/2024", top_speed_kmh), engine, CarSpec::Omnibus { doors: 2 })
            .unwrap()
    }

    fn formula1(top_speed_kmh: f64, reassembly_count: u32) -> Car {
        let engine = Engine::from(HighPerformanceEngine::new(
            EngineBase::new("HP01", "01/02/2024", "Rosa", reassembly_count),
            1000.0,
            10.0,
        ));
        Car::assemble(
            CarHeader::new("02/02/2024", top_speed_kmh),
            engine,
            CarSpec::Formula1 { body_weight_kg: 512.0 },
        )
        .unwrap()
    }

    fn de_lujo(reassembly_count: u32) -> Car {
        let engine = Engine::from(WorkEngine::new(
            EngineBase::new("WK01", "01/02/2024", "Rosa", reassembly_count),
            true,
        ));
        Car::assemble(
            CarHeader::new("02/02/2024", 190.0),
            engine,
            CarSpec::DeLujo { seats: 2, upholstery_cost: 100.0 },
        )
        .unwrap()
    }

    #[test]
    fn test_high_speed_cars_strictly_above_threshold() {
        let cars = vec![formula1(150.0, 0), formula1(151.0, 0), force_bus(100, 300.0, 0)];
        let engine = ReportingEngine::new();

        let fast = engine.high_speed_cars(&cars, 150.0);
        let speeds: Vec<f64> = fast.clone().map(|c| c.top_speed_kmh()).collect();
        assert_eq!(speeds, vec![151.0, 300.0]);
        assert_eq!(fast.count(), 2, "序列可重复遍历");
    }

    #[test]
    fn test_largest_omnibus_first_wins_tie() {
        let cars = vec![
            formula1(300.0, 0),
            force_bus(120, 90.0, 0),
            force_bus(129, 90.0, 0),
            force_bus(200, 90.0, 0),
            force_bus(205, 90.0, 0),
        ];
        let largest = ReportingEngine::new().largest_omnibus(&cars).unwrap();

        assert_eq!(largest.seats(), 20);
        assert_eq!(largest.engine_code(), "FO200");
        assert!(ReportingEngine::new().largest_omnibus(&cars[..1]).is_none());
    }

    #[test]
    fn test_price_impact_is_idempotent() {
        let cars = vec![formula1(200.0, 2), formula1(200.0, 0), de_lujo(1), force_bus(100, 80.0, 1)];
        let engine = ReportingEngine::new();
        let snapshot = cars.clone();

        let first = engine.reassembled_price_impact(&cars);
        let second = engine.reassembled_price_impact(&cars);

        assert_eq!(first, second);
        assert_eq!(cars, snapshot, "试算不应改变任何整车");
        assert_eq!(first.len(), 2, "豪华车与未返修整车不计入");
        assert_eq!(first[0].kind, CarKind::Formula1);
        assert_eq!(first[0].delta, 100.0);
        // 100 × (5 − 0) × 3 − 100 × (5 − 100) × 3
        assert_eq!(first[1].delta, 1500.0 + 28500.0);
    }

    #[test]
    fn test_plan_compliance() {
        let counters = ProductionCounters {
            engines_produced: 250,
            cars_produced: 100,
        };
        let compliance = ReportingEngine::new().plan_compliance(&counters, 1000, 500);
        assert_eq!(compliance, PlanCompliance { engine_percent: 25.0, car_percent: 20.0 });

        let zero = ReportingEngine::new().plan_compliance(&counters, 0, 0);
        assert_eq!(zero.engine_percent, 0.0);
    }

    #[test]
    fn test_profit_by_variant_has_all_kinds() {
        let cars = vec![force_bus(100, 90.0, 0), force_bus(200, 90.0, 0), de_lujo(0)];
        let profits = ReportingEngine::new().profit_by_variant(&cars);

        assert_eq!(profits.len(), 4);
        assert_eq!(profits[&CarKind::Formula1], 0.0);
        // Omnibus: (3 + 500)×3 − 500 + (3 + 1000)×3 − 1000
        assert_eq!(profits[&CarKind::Omnibus], 1009.0 + 2009.0);
        // DeLujo: (100 + 10000)×10 − 10000
        assert_eq!(profits[&CarKind::DeLujo], 91000.0);
    }
}
