// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use car_factory::domain::car::CarSpec;
use car_factory::domain::engine::EngineSpec;
use car_factory::production::{CarOrder, EngineOrder};

// ==========================================
// EngineOrder 构建器
// ==========================================

pub struct EngineOrderBuilder {
    code: String,
    release_date: String,
    specialist: String,
    reassembly_count: u32,
    spec: EngineSpec,
}

impl EngineOrderBuilder {
    /// 默认是 200 马力的力量型发动机
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            release_date: "01/01/2024".to_string(),
            specialist: "Carla".to_string(),
            reassembly_count: 0,
            spec: EngineSpec::Force { horsepower: 200 },
        }
    }

    pub fn high_performance(mut self, max_rpm: f64, fuel_efficiency_km_l: f64) -> Self {
        self.spec = EngineSpec::HighPerformance {
            max_rpm,
            fuel_efficiency_km_l,
        };
        self
    }

    pub fn force(mut self, horsepower: u32) -> Self {
        self.spec = EngineSpec::Force { horsepower };
        self
    }

    pub fn work(mut self, handcrafted: bool) -> Self {
        self.spec = EngineSpec::Work { handcrafted };
        self
    }

    pub fn reassembly_count(mut self, count: u32) -> Self {
        self.reassembly_count = count;
        self
    }

    pub fn specialist(mut self, name: &str) -> Self {
        self.specialist = name.to_string();
        self
    }

    pub fn build(self) -> EngineOrder {
        EngineOrder {
            code: self.code,
            release_date: self.release_date,
            specialist: self.specialist,
            reassembly_count: self.reassembly_count,
            spec: self.spec,
        }
    }
}

// ==========================================
// CarOrder 构建器
// ==========================================

pub struct CarOrderBuilder {
    release_date: String,
    top_speed_kmh: f64,
    spec: CarSpec,
}

impl CarOrderBuilder {
    fn with_spec(spec: CarSpec) -> Self {
        Self {
            release_date: "15/01/2024".to_string(),
            top_speed_kmh: 120.0,
            spec,
        }
    }

    pub fn formula1(body_weight_kg: f64) -> Self {
        Self::with_spec(CarSpec::Formula1 { body_weight_kg })
    }

    pub fn omnibus(doors: u32) -> Self {
        Self::with_spec(CarSpec::Omnibus { doors })
    }

    pub fn sport(seats: u32, gear_speeds: u32, universal_shifter: bool) -> Self {
        Self::with_spec(CarSpec::Sport {
            seats,
            gear_speeds,
            universal_shifter,
        })
    }

    pub fn de_lujo(seats: u32, upholstery_cost: f64) -> Self {
        Self::with_spec(CarSpec::DeLujo {
            seats,
            upholstery_cost,
        })
    }

    pub fn top_speed(mut self, kmh: f64) -> Self {
        self.top_speed_kmh = kmh;
        self
    }

    pub fn build(self) -> CarOrder {
        CarOrder {
            release_date: self.release_date,
            top_speed_kmh: self.top_speed_kmh,
            spec: self.spec,
        }
    }
}
