// ==========================================
// 汽车工厂生产线 - 工厂 API
// ==========================================
// 职责: 对外唯一调用边界 (入库 / 装配 / 拆解 / 报表)
// 并发: 整个 FactoryState 由一把互斥锁保护，每个操作独占
// 审计: 每次成功的写操作记录 ActionLog
// ==========================================

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::config::FactoryConfig;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::car::{Car, CarId, PricedSaleable};
use crate::domain::engine::Engine;
use crate::domain::sheet::{Describable, TechnicalSheet};
use crate::domain::types::{CarKind, EngineKind};
use crate::perf::PerfGuard;
use crate::production::{
    AssemblyLine, CarOrder, DecommissionUnit, EngineId, EngineOrder, PlanCompliance, PriceImpact,
    ReportingEngine,
};
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::factory_state::{FactoryState, ProductionCounters};

// ==========================================
// 查询结果 DTO
// ==========================================

/// 某一品类的待装配发动机
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnginePool {
    pub kind: EngineKind,
    pub count: usize,
    pub engines: Vec<Engine>,
}

/// 按品类分组的库存
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableEngines {
    pub pools: Vec<EnginePool>,
}

impl AvailableEngines {
    pub fn pool(&self, kind: EngineKind) -> Option<&EnginePool> {
        self.pools.iter().find(|pool| pool.kind == kind)
    }

    pub fn total(&self) -> usize {
        self.pools.iter().map(|pool| pool.count).sum()
    }
}

// ==========================================
// FactoryApi - 工厂 API
// ==========================================
pub struct FactoryApi {
    state: Mutex<FactoryState>,
    config: FactoryConfig,
    assembly: AssemblyLine,
    decommission: DecommissionUnit,
    reporting: ReportingEngine,
    action_log_repo: Arc<ActionLogRepository>,
}

impl FactoryApi {
    /// 创建空工厂
    pub fn new(config: FactoryConfig, action_log_repo: Arc<ActionLogRepository>) -> Self {
        Self::with_state(FactoryState::new(), config, action_log_repo)
    }

    /// 以已有状态创建 (测试/预置场景)
    pub fn with_state(
        state: FactoryState,
        config: FactoryConfig,
        action_log_repo: Arc<ActionLogRepository>,
    ) -> Self {
        Self {
            state: Mutex::new(state),
            config,
            assembly: AssemblyLine::new(),
            decommission: DecommissionUnit::new(),
            reporting: ReportingEngine::new(),
            action_log_repo,
        }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    fn lock_state(&self) -> ApiResult<MutexGuard<'_, FactoryState>> {
        self.state
            .lock()
            .map_err(|e| ApiError::InternalError(format!("工厂状态锁获取失败: {}", e)))
    }

    /// 记录操作日志；失败时只告警，已提交的状态变更不回退
    fn record_action(&self, log: &ActionLog) {
        if let Err(e) = self.action_log_repo.insert(log) {
            tracing::warn!(error = %e, action_type = ?log.action_type, "记录操作日志失败");
        }
    }

    // ==========================================
    // 写操作
    // ==========================================

    /// 发动机入库
    ///
    /// # 返回
    /// - Ok(EngineId): 发动机编码
    /// - Err(InvalidInput): 编码为空
    /// - Err(InvalidConfiguration): 马力越界 / 转速或油耗非正数
    pub fn add_engine(&self, order: EngineOrder) -> ApiResult<EngineId> {
        let _perf = PerfGuard::new("add_engine");

        if order.code.trim().is_empty() {
            return Err(ApiError::InvalidInput("发动机编码不能为空".to_string()));
        }

        let payload = serde_json::to_value(&order).map_err(|e| ApiError::Other(e.into()))?;
        let mut state = self.lock_state()?;
        let engine_id = self.assembly.add_engine(&mut state, order)?;

        let log = ActionLog::now(ActionType::AddEngine)
            .engine_code(&engine_id)
            .payload(payload)
            .detail(format!("发动机入库: {}", engine_id));
        self.record_action(&log);

        Ok(engine_id)
    }

    /// 整车装配
    ///
    /// # 返回
    /// - Ok(CarId): 新整车ID
    /// - Err(EngineUnavailable): 无匹配库存
    /// - Err(InvalidConfiguration): 字段越界或非正数 (发动机已原位退回)
    pub fn assemble_car(&self, order: CarOrder) -> ApiResult<CarId> {
        let _perf = PerfGuard::new("assemble_car");

        let payload = serde_json::to_value(&order).map_err(|e| ApiError::Other(e.into()))?;
        let mut state = self.lock_state()?;
        let car = self.assembly.assemble(&mut state, order)?;

        let log = ActionLog::now(ActionType::AssembleCar)
            .engine_code(car.engine_code())
            .car_id(car.id())
            .payload(payload)
            .detail(format!("整车装配: {} <- {}", car.kind(), car.engine_code()));
        self.record_action(&log);

        Ok(car.id().to_string())
    }

    /// 拆解返修
    ///
    /// # 返回
    /// - Ok(Engine): 返修入库后的发动机
    /// - Err(NotFound): 没有装有该发动机的整车
    pub fn decommission_car(&self, engine_code: &str) -> ApiResult<Engine> {
        let _perf = PerfGuard::new("decommission_car");

        let mut state = self.lock_state()?;
        let car_id = state
            .cars
            .find_by_engine_code(engine_code)
            .map(|car| car.id().to_string());
        let engine = self.decommission.decommission(&mut state, engine_code)?;

        let mut log = ActionLog::now(ActionType::DecommissionCar)
            .engine_code(engine.code())
            .payload(serde_json::json!({
                "engine_code": engine.code(),
                "engine_kind": engine.kind(),
                "reassembly_count": engine.reassembly_count(),
            }))
            .detail(format!("拆解返修: {}", engine.code()));
        if let Some(car_id) = car_id.as_deref() {
            log = log.car_id(car_id);
        }
        self.record_action(&log);

        Ok(engine)
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 按品类分组的待装配发动机
    pub fn list_available_engines(&self) -> ApiResult<AvailableEngines> {
        let _perf = PerfGuard::new("list_available_engines");
        let state = self.lock_state()?;
        let inventory = &state.inventory;

        let pools = vec![
            EnginePool {
                kind: EngineKind::HighPerformance,
                count: inventory.high_performance.len(),
                engines: inventory.high_performance.iter().cloned().map(Engine::from).collect(),
            },
            EnginePool {
                kind: EngineKind::Force,
                count: inventory.force.len(),
                engines: inventory.force.iter().cloned().map(Engine::from).collect(),
            },
            EnginePool {
                kind: EngineKind::Work,
                count: inventory.work.len(),
                engines: inventory.work.iter().cloned().map(Engine::from).collect(),
            },
        ];
        Ok(AvailableEngines { pools })
    }

    /// 已装配整车 (装配顺序)
    pub fn list_assembled_cars(&self) -> ApiResult<Vec<Car>> {
        let _perf = PerfGuard::new("list_assembled_cars");
        let state = self.lock_state()?;
        Ok(state.cars.as_slice().to_vec())
    }

    /// 高速车；未指定阈值时使用配置值
    pub fn high_speed_cars(&self, threshold_kmh: Option<f64>) -> ApiResult<Vec<Car>> {
        let _perf = PerfGuard::new("high_speed_cars");
        let threshold_kmh = threshold_kmh.unwrap_or(self.config.high_speed_threshold_kmh);
        if threshold_kmh.is_nan() {
            return Err(ApiError::InvalidInput("时速阈值不能为 NaN".to_string()));
        }

        let state = self.lock_state()?;
        Ok(self
            .reporting
            .high_speed_cars(state.cars.as_slice(), threshold_kmh)
            .cloned()
            .collect())
    }

    /// 座位最多的大客车
    pub fn largest_omnibus(&self) -> ApiResult<Option<Car>> {
        let _perf = PerfGuard::new("largest_omnibus");
        let state = self.lock_state()?;
        Ok(self.reporting.largest_omnibus(state.cars.as_slice()).cloned())
    }

    /// 返修发动机造成的降价
    pub fn reassembled_price_impact(&self) -> ApiResult<Vec<PriceImpact>> {
        let _perf = PerfGuard::new("reassembled_price_impact");
        let state = self.lock_state()?;
        Ok(self.reporting.reassembled_price_impact(state.cars.as_slice()))
    }

    /// 年度计划达成率
    pub fn plan_compliance(&self) -> ApiResult<PlanCompliance> {
        let _perf = PerfGuard::new("plan_compliance");
        let state = self.lock_state()?;
        Ok(self.reporting.plan_compliance(
            &state.counters,
            self.config.annual_engine_plan,
            self.config.annual_car_plan,
        ))
    }

    /// 分品类利润
    pub fn profit_by_variant(&self) -> ApiResult<BTreeMap<CarKind, f64>> {
        let _perf = PerfGuard::new("profit_by_variant");
        let state = self.lock_state()?;
        Ok(self.reporting.profit_by_variant(state.cars.as_slice()))
    }

    /// 全部整车参数表
    pub fn technical_sheets(&self) -> ApiResult<Vec<TechnicalSheet>> {
        let _perf = PerfGuard::new("technical_sheets");
        let state = self.lock_state()?;
        Ok(state.cars.iter().map(|car| car.technical_sheet()).collect())
    }

    /// 单台整车售价
    pub fn sale_price(&self, car_id: &str) -> ApiResult<f64> {
        let state = self.lock_state()?;
        state
            .cars
            .find_by_id(car_id)
            .map(|car| car.sale_price())
            .ok_or_else(|| ApiError::NotFound {
                entity: "car".to_string(),
                id: car_id.to_string(),
            })
    }

    /// 累计产量
    pub fn production_counters(&self) -> ApiResult<ProductionCounters> {
        let state = self.lock_state()?;
        Ok(state.counters)
    }

    /// 工厂状态快照
    pub fn snapshot(&self) -> ApiResult<FactoryState> {
        let state = self.lock_state()?;
        Ok(state.clone())
    }

    // ==========================================
    // 审计查询
    // ==========================================

    pub fn list_action_logs(&self) -> ApiResult<Vec<ActionLog>> {
        Ok(self.action_log_repo.list_all()?)
    }

    /// 最近 N 条操作日志 (新的在前)
    pub fn recent_action_logs(&self, limit: usize) -> ApiResult<Vec<ActionLog>> {
        if limit == 0 {
            return Err(ApiError::InvalidInput("limit 必须大于 0".to_string()));
        }
        Ok(self.action_log_repo.list_recent(limit)?)
    }
}
