// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// ==========================================

use std::sync::Arc;

use car_factory::api::FactoryApi;
use car_factory::config::FactoryConfig;
use car_factory::domain::types::EngineKind;
use car_factory::repository::ActionLogRepository;

use super::test_data_builder::EngineOrderBuilder;

/// API测试环境
pub struct ApiTestEnv {
    pub api: FactoryApi,
    pub action_log_repo: Arc<ActionLogRepository>,
}

impl ApiTestEnv {
    /// 默认配置 (计划 1000 / 500，阈值 150)
    pub fn new() -> Self {
        Self::with_config(FactoryConfig::default())
    }

    pub fn with_config(config: FactoryConfig) -> Self {
        car_factory::logging::init_test();
        let action_log_repo = Arc::new(ActionLogRepository::new());
        let api = FactoryApi::new(config, action_log_repo.clone());
        Self {
            api,
            action_log_repo,
        }
    }

    /// 批量入库力量型发动机，编码为 `{prefix}{序号}`
    pub fn stock_force_engines(&self, prefix: &str, count: usize, horsepower: u32) {
        for i in 0..count {
            let order = EngineOrderBuilder::new(&format!("{}{:04}", prefix, i))
                .force(horsepower)
                .build();
            self.api.add_engine(order).expect("入库失败");
        }
    }

    /// 某品类库存数量
    pub fn pool_count(&self, kind: EngineKind) -> usize {
        self.api
            .list_available_engines()
            .expect("库存查询失败")
            .pool(kind)
            .map(|pool| pool.count)
            .unwrap_or(0)
    }
}
