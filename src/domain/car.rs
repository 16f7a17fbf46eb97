// ==========================================
// 汽车工厂生产线 - 整车领域模型
// ==========================================
// 职责: 四类整车的值对象、结构约束与售价公式
// 红线: 整车独占其发动机 (所有权转移，不共享)
// 红线: 售价/参数表是对当前发动机状态的纯读取
// ==========================================

use crate::domain::engine::{Costed, Engine, EngineBase, ForceEngine, HighPerformanceEngine, WorkEngine};
use crate::domain::error::{validate_positive, ConfigurationError, Rejected};
use crate::domain::sheet::{Describable, TechnicalSheet};
use crate::domain::types::{CarKind, COUPE_SEATS_RANGE, FORMULA1_SEATS, HORSEPOWER_PER_SEAT};
use serde::{Deserialize, Serialize};

/// 整车ID
pub type CarId = String;

// ==========================================
// Trait: PricedSaleable
// ==========================================
pub trait PricedSaleable {
    fn sale_price(&self) -> f64;
}

// ==========================================
// CarHeader - 装配时由调用方提供的公共字段
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarHeader {
    pub id: CarId,
    pub release_date: String,
    pub top_speed_kmh: f64,
}

impl CarHeader {
    /// 生成新的整车ID
    pub fn new(release_date: impl Into<String>, top_speed_kmh: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            release_date: release_date.into(),
            top_speed_kmh,
        }
    }
}

// ==========================================
// CarBase - 整车公共字段
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarBase {
    pub id: CarId,
    pub seats: u32,
    pub top_speed_kmh: f64,
    pub release_date: String,
}

impl CarBase {
    fn from_header(header: CarHeader, seats: u32) -> Self {
        Self {
            id: header.id,
            seats,
            top_speed_kmh: header.top_speed_kmh,
            release_date: header.release_date,
        }
    }

    fn sheet(&self, kind: CarKind) -> TechnicalSheet {
        TechnicalSheet::new(kind.as_str())
            .field("car_id", self.id.as_str())
            .field("release_date", self.release_date.as_str())
            .field("seats", self.seats)
            .field("top_speed_kmh", self.top_speed_kmh)
    }
}

/// Sport / DeLujo 座位数校验
pub fn validate_coupe_seats(seats: u32) -> Result<u32, ConfigurationError> {
    if COUPE_SEATS_RANGE.contains(&seats) {
        Ok(seats)
    } else {
        Err(ConfigurationError::SeatsOutOfRange {
            value: seats,
            min: *COUPE_SEATS_RANGE.start(),
            max: *COUPE_SEATS_RANGE.end(),
        })
    }
}

// ==========================================
// Formula1 - 方程式赛车 (高性能发动机，单座)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula1 {
    pub base: CarBase,
    pub engine: HighPerformanceEngine,
    pub body_weight_kg: f64,
}

impl Formula1 {
    pub fn new(header: CarHeader, engine: HighPerformanceEngine, body_weight_kg: f64) -> Self {
        Self {
            base: CarBase::from_header(header, FORMULA1_SEATS),
            engine,
            body_weight_kg,
        }
    }
}

impl PricedSaleable for Formula1 {
    /// 速度 × 5 + 1 / 车身重量 + 发动机成本
    fn sale_price(&self) -> f64 {
        self.base.top_speed_kmh * 5.0 + 1.0 / self.body_weight_kg + self.engine.compute_cost()
    }
}

// ==========================================
// Omnibus - 大客车 (力量型发动机)
// ==========================================
// 座位数 = 马力 / 10 (整除)，装配时由发动机推导
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Omnibus {
    pub base: CarBase,
    pub engine: ForceEngine,
    pub doors: u32,
}

impl Omnibus {
    pub fn new(header: CarHeader, engine: ForceEngine, doors: u32) -> Self {
        let seats = engine.horsepower / HORSEPOWER_PER_SEAT;
        Self {
            base: CarBase::from_header(header, seats),
            engine,
            doors,
        }
    }
}

impl PricedSaleable for Omnibus {
    /// (车门数 × 1.5 + 发动机成本) × 3
    fn sale_price(&self) -> f64 {
        (f64::from(self.doors) * 1.5 + self.engine.compute_cost()) * 3.0
    }
}

// ==========================================
// Sport - 跑车 (工作型发动机，2~4 座)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sport {
    pub base: CarBase,
    pub engine: WorkEngine,
    pub gear_speeds: u32,
    pub universal_shifter: bool,
}

impl Sport {
    pub fn new(
        header: CarHeader,
        engine: WorkEngine,
        seats: u32,
        gear_speeds: u32,
        universal_shifter: bool,
    ) -> Result<Self, Rejected<WorkEngine>> {
        let seats = match validate_coupe_seats(seats) {
            Ok(seats) => seats,
            Err(reason) => return Err(Rejected::new(reason, engine)),
        };
        Ok(Self {
            base: CarBase::from_header(header, seats),
            engine,
            gear_speeds,
            universal_shifter,
        })
    }
}

impl PricedSaleable for Sport {
    /// 变速箱档位 × 2 + 发动机成本，万向换挡 +1000
    fn sale_price(&self) -> f64 {
        let price = f64::from(self.gear_speeds) * 2.0 + self.engine.compute_cost();
        if self.universal_shifter {
            price + 1000.0
        } else {
            price
        }
    }
}

// ==========================================
// DeLujo - 豪华车 (手工打造的工作型发动机，2~4 座)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeLujo {
    pub base: CarBase,
    pub engine: WorkEngine,
    pub upholstery_cost: f64,
}

impl DeLujo {
    pub fn new(
        header: CarHeader,
        engine: WorkEngine,
        seats: u32,
        upholstery_cost: f64,
    ) -> Result<Self, Rejected<WorkEngine>> {
        if !engine.handcrafted {
            let reason = ConfigurationError::EngineNotHandcrafted {
                engine_code: engine.base.code.clone(),
            };
            return Err(Rejected::new(reason, engine));
        }
        let seats = match validate_coupe_seats(seats) {
            Ok(seats) => seats,
            Err(reason) => return Err(Rejected::new(reason, engine)),
        };
        Ok(Self {
            base: CarBase::from_header(header, seats),
            engine,
            upholstery_cost,
        })
    }
}

impl PricedSaleable for DeLujo {
    /// (内饰成本 + 发动机成本) × 10
    fn sale_price(&self) -> f64 {
        (self.upholstery_cost + self.engine.compute_cost()) * 10.0
    }
}

// ==========================================
// CarSpec - 各品类专属字段 (装配请求)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarSpec {
    Formula1 { body_weight_kg: f64 },
    Omnibus { doors: u32 },
    Sport { seats: u32, gear_speeds: u32, universal_shifter: bool },
    DeLujo { seats: u32, upholstery_cost: f64 },
}

impl CarSpec {
    pub fn kind(&self) -> CarKind {
        match self {
            CarSpec::Formula1 { .. } => CarKind::Formula1,
            CarSpec::Omnibus { .. } => CarKind::Omnibus,
            CarSpec::Sport { .. } => CarKind::Sport,
            CarSpec::DeLujo { .. } => CarKind::DeLujo,
        }
    }
}

// ==========================================
// Car - 整车 (带品类标签)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Car {
    Formula1(Formula1),
    Omnibus(Omnibus),
    Sport(Sport),
    DeLujo(DeLujo),
}

impl Car {
    /// 用一台发动机按品类字段构造整车
    ///
    /// 品类不匹配或字段越界时，发动机随 `Rejected` 一并返还
    pub fn assemble(header: CarHeader, engine: Engine, spec: CarSpec) -> Result<Car, Rejected<Engine>> {
        if let Err(reason) = validate_positive("top_speed_kmh", header.top_speed_kmh) {
            return Err(Rejected::new(reason, engine));
        }
        match (spec, engine) {
            (CarSpec::Formula1 { body_weight_kg }, Engine::HighPerformance(engine)) => {
                match validate_positive("body_weight_kg", body_weight_kg) {
                    Ok(body_weight_kg) => Ok(Car::Formula1(Formula1::new(header, engine, body_weight_kg))),
                    Err(reason) => Err(Rejected::new(reason, Engine::HighPerformance(engine))),
                }
            }
            (CarSpec::Omnibus { doors }, Engine::Force(engine)) => {
                Ok(Car::Omnibus(Omnibus::new(header, engine, doors)))
            }
            (CarSpec::Sport { seats, gear_speeds, universal_shifter }, Engine::Work(engine)) => {
                Sport::new(header, engine, seats, gear_speeds, universal_shifter)
                    .map(Car::Sport)
                    .map_err(|rejected| rejected.map_engine(Engine::Work))
            }
            (CarSpec::DeLujo { seats, upholstery_cost }, Engine::Work(engine)) => {
                DeLujo::new(header, engine, seats, upholstery_cost)
                    .map(Car::DeLujo)
                    .map_err(|rejected| rejected.map_engine(Engine::Work))
            }
            (spec, engine) => {
                let reason = ConfigurationError::EngineMismatch {
                    car: spec.kind(),
                    engine: engine.kind(),
                };
                Err(Rejected::new(reason, engine))
            }
        }
    }

    pub fn kind(&self) -> CarKind {
        match self {
            Car::Formula1(_) => CarKind::Formula1,
            Car::Omnibus(_) => CarKind::Omnibus,
            Car::Sport(_) => CarKind::Sport,
            Car::DeLujo(_) => CarKind::DeLujo,
        }
    }

    pub fn base(&self) -> &CarBase {
        match self {
            Car::Formula1(c) => &c.base,
            Car::Omnibus(c) => &c.base,
            Car::Sport(c) => &c.base,
            Car::DeLujo(c) => &c.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn seats(&self) -> u32 {
        self.base().seats
    }

    pub fn top_speed_kmh(&self) -> f64 {
        self.base().top_speed_kmh
    }

    pub fn engine_base(&self) -> &EngineBase {
        match self {
            Car::Formula1(c) => &c.engine.base,
            Car::Omnibus(c) => &c.engine.base,
            Car::Sport(c) => &c.engine.base,
            Car::DeLujo(c) => &c.engine.base,
        }
    }

    pub fn engine_base_mut(&mut self) -> &mut EngineBase {
        match self {
            Car::Formula1(c) => &mut c.engine.base,
            Car::Omnibus(c) => &mut c.engine.base,
            Car::Sport(c) => &mut c.engine.base,
            Car::DeLujo(c) => &mut c.engine.base,
        }
    }

    pub fn engine_code(&self) -> &str {
        &self.engine_base().code
    }

    pub fn engine_cost(&self) -> f64 {
        match self {
            Car::Formula1(c) => c.engine.compute_cost(),
            Car::Omnibus(c) => c.engine.compute_cost(),
            Car::Sport(c) => c.engine.compute_cost(),
            Car::DeLujo(c) => c.engine.compute_cost(),
        }
    }

    /// 拆车，交出发动机
    pub fn into_engine(self) -> Engine {
        match self {
            Car::Formula1(c) => Engine::HighPerformance(c.engine),
            Car::Omnibus(c) => Engine::Force(c.engine),
            Car::Sport(c) => Engine::Work(c.engine),
            Car::DeLujo(c) => Engine::Work(c.engine),
        }
    }

    /// 利润 = 售价 − 发动机成本
    pub fn profit(&self) -> f64 {
        self.sale_price() - self.engine_cost()
    }
}

impl PricedSaleable for Car {
    fn sale_price(&self) -> f64 {
        match self {
            Car::Formula1(c) => c.sale_price(),
            Car::Omnibus(c) => c.sale_price(),
            Car::Sport(c) => c.sale_price(),
            Car::DeLujo(c) => c.sale_price(),
        }
    }
}

impl Describable for Car {
    fn technical_sheet(&self) -> TechnicalSheet {
        let kind = self.kind();
        let sheet = self.base().sheet(kind);
        let (sheet, engine_sheet) = match self {
            Car::Formula1(c) => (
                sheet.field("body_weight_kg", c.body_weight_kg),
                c.engine.technical_sheet(),
            ),
            Car::Omnibus(c) => (sheet.field("doors", c.doors), c.engine.technical_sheet()),
            Car::Sport(c) => (
                sheet
                    .field("gear_speeds", c.gear_speeds)
                    .field("universal_shifter", c.universal_shifter),
                c.engine.technical_sheet(),
            ),
            Car::DeLujo(c) => (
                sheet.field("upholstery_cost", c.upholstery_cost),
                c.engine.technical_sheet(),
            ),
        };
        sheet.field("sale_price", self.sale_price()).with_engine(engine_sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::EngineKind;

    fn header(top_speed_kmh: f64) -> CarHeader {
        CarHeader::new("15/03/2024", top_speed_kmh)
    }

    fn engine_base(code: &str, reassembly_count: u32) -> EngineBase {
        EngineBase::new(code, "01/01/2024", "Luis", reassembly_count)
    }

    #[test]
    fn test_formula1_price_and_fixed_seat() {
        let engine = HighPerformanceEngine::new(engine_base("HP0000000001", 0), 1000.0, 10.0);
        let car = Formula1::new(header(300.0), engine, 4.0);

        assert_eq!(car.base.seats, 1);
        // 300×5 + 1/4 + (1500 + 10)
        assert_eq!(car.sale_price(), 1500.0 + 0.25 + 1510.0);
    }

    #[test]
    fn test_omnibus_seats_from_horsepower() {
        let engine = ForceEngine::new(engine_base("FO0000000001", 0), 95);
        let bus = Omnibus::new(header(90.0), engine, 3);

        assert_eq!(bus.base.seats, 9, "95 马力应推导出 9 个座位");
        // (3×1.5 + 475) × 3
        assert_eq!(bus.sale_price(), (4.5 + 475.0) * 3.0);
    }

    #[test]
    fn test_sport_price_with_universal_shifter() {
        let engine = WorkEngine::new(engine_base("WK0000000001", 0), false);
        let sport = Sport::new(header(220.0), engine, 2, 6, true).unwrap();

        assert_eq!(sport.sale_price(), 12.0 + 1000.0 + 1000.0);
    }

    #[test]
    fn test_sport_rejects_seats_and_returns_engine() {
        let engine = WorkEngine::new(engine_base("WK0000000002", 0), false);
        let rejected = Sport::new(header(220.0), engine, 5, 6, false).unwrap_err();

        assert_eq!(
            rejected.reason,
            ConfigurationError::SeatsOutOfRange { value: 5, min: 2, max: 4 }
        );
        assert_eq!(rejected.engine.base.code, "WK0000000002");
    }

    #[test]
    fn test_de_lujo_requires_handcrafted() {
        let engine = WorkEngine::new(engine_base("WK0000000003", 0), false);
        let rejected = DeLujo::new(header(180.0), engine, 4, 500.0).unwrap_err();
        assert!(matches!(
            rejected.reason,
            ConfigurationError::EngineNotHandcrafted { .. }
        ));

        let engine = WorkEngine::new(engine_base("WK0000000004", 0), true);
        let car = DeLujo::new(header(180.0), engine, 4, 500.0).unwrap();
        assert_eq!(car.sale_price(), (500.0 + 10000.0) * 10.0);
    }

    #[test]
    fn test_assemble_mismatch_returns_engine() {
        let engine = Engine::from(ForceEngine::new(engine_base("FO0000000002", 0), 200));
        let rejected = Car::assemble(header(100.0), engine, CarSpec::Formula1 { body_weight_kg: 600.0 })
            .unwrap_err();

        assert_eq!(
            rejected.reason,
            ConfigurationError::EngineMismatch {
                car: CarKind::Formula1,
                engine: EngineKind::Force,
            }
        );
        assert_eq!(rejected.engine.code(), "FO0000000002");
    }

    #[test]
    fn test_assemble_rejects_non_positive_speed_and_weight() {
        let engine = Engine::from(HighPerformanceEngine::new(engine_base("HP0000000002", 1), 1000.0, 10.0));
        let rejected = Car::assemble(header(-5.0), engine, CarSpec::Formula1 { body_weight_kg: 500.0 })
            .unwrap_err();
        assert_eq!(
            rejected.reason,
            ConfigurationError::NonPositive { field: "top_speed_kmh", value: -5.0 }
        );

        let rejected = Car::assemble(header(200.0), rejected.engine, CarSpec::Formula1 { body_weight_kg: 0.0 })
            .unwrap_err();
        assert_eq!(
            rejected.reason,
            ConfigurationError::NonPositive { field: "body_weight_kg", value: 0.0 }
        );
        assert_eq!(rejected.engine.code(), "HP0000000002", "发动机随拒绝结果返还");

        let engine = Engine::from(ForceEngine::new(engine_base("FO0000000004", 0), 200));
        let rejected = Car::assemble(header(0.0), engine, CarSpec::Omnibus { doors: 2 }).unwrap_err();
        assert!(matches!(rejected.reason, ConfigurationError::NonPositive { .. }));
    }

    #[test]
    fn test_price_follows_engine_state() {
        let engine = Engine::from(WorkEngine::new(engine_base("WK0000000005", 0), false));
        let mut car = Car::assemble(
            header(160.0),
            engine,
            CarSpec::Sport { seats: 2, gear_speeds: 5, universal_shifter: false },
        )
        .unwrap();

        let before = car.sale_price();
        car.engine_base_mut().reassembly_count = 1;
        assert_eq!(before - car.sale_price(), 100.0);
        assert_eq!(car.profit(), 10.0, "Sport 利润 = 档位 × 2");
    }

    #[test]
    fn test_car_sheet_nests_engine() {
        let engine = Engine::from(ForceEngine::new(engine_base("FO0000000003", 0), 120));
        let car = Car::assemble(header(80.0), engine, CarSpec::Omnibus { doors: 2 }).unwrap();
        let sheet = car.technical_sheet();

        assert_eq!(sheet.kind, "OMNIBUS");
        assert_eq!(sheet.get("seats"), Some(&serde_json::json!(12)));
        assert!(sheet.get("sale_price").is_some());
        let engine_sheet = sheet.engine.expect("整车参数表应包含发动机");
        assert_eq!(engine_sheet.get("code"), Some(&serde_json::json!("FO0000000003")));
    }

    #[test]
    fn test_into_engine_keeps_variant() {
        let engine = Engine::from(WorkEngine::new(engine_base("WK0000000006", 0), true));
        let car = Car::assemble(
            header(150.0),
            engine,
            CarSpec::DeLujo { seats: 3, upholstery_cost: 100.0 },
        )
        .unwrap();

        let engine = car.into_engine();
        assert_eq!(engine.kind(), EngineKind::Work);
        assert_eq!(engine.code(), "WK0000000006");
    }
}
