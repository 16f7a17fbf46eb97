// ==========================================
// 汽车工厂生产线 - 已装配整车登记簿
// ==========================================
// 职责: 按装配顺序保存整车
// 红线: Repository 不做业务逻辑,只做存取
// ==========================================

use crate::domain::car::Car;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarRegistry {
    cars: Vec<Car>,
}

impl CarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, car: Car) {
        self.cars.push(car);
    }

    /// 按发动机编码定位整车 (按装配顺序取第一台)
    pub fn position_by_engine_code(&self, engine_code: &str) -> Option<usize> {
        self.cars.iter().position(|car| car.engine_code() == engine_code)
    }

    pub fn find_by_engine_code(&self, engine_code: &str) -> Option<&Car> {
        self.cars.iter().find(|car| car.engine_code() == engine_code)
    }

    pub fn find_by_id(&self, car_id: &str) -> Option<&Car> {
        self.cars.iter().find(|car| car.id() == car_id)
    }

    /// 移除指定位置的整车，其余顺序不变
    pub fn remove(&mut self, index: usize) -> Option<Car> {
        if index < self.cars.len() {
            Some(self.cars.remove(index))
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[Car] {
        &self.cars
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Car> {
        self.cars.iter()
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::car::{CarHeader, CarSpec};
    use crate::domain::engine::{Engine, EngineBase, ForceEngine};

    fn omnibus(engine_code: &str) -> Car {
        let engine = Engine::from(ForceEngine::new(
            EngineBase::new(engine_code, "01/01/2024", "Eva", 0),
            100,
        ));
        Car::assemble(CarHeader::new("02/02/2024", 90.0), engine, CarSpec::Omnibus { doors: 2 }).unwrap()
    }

    #[test]
    fn test_first_match_by_insertion_order() {
        let mut registry = CarRegistry::new();
        registry.push(omnibus("A"));
        registry.push(omnibus("B"));
        registry.push(omnibus("B"));

        assert_eq!(registry.position_by_engine_code("B"), Some(1));
        assert!(registry.position_by_engine_code("C").is_none());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut registry = CarRegistry::new();
        registry.push(omnibus("A"));
        registry.push(omnibus("B"));
        registry.push(omnibus("C"));

        let removed = registry.remove(1).unwrap();
        assert_eq!(removed.engine_code(), "B");
        let codes: Vec<&str> = registry.iter().map(|c| c.engine_code()).collect();
        assert_eq!(codes, vec!["A", "C"]);
        assert!(registry.remove(5).is_none());
    }
}
