// ==========================================
// 配置加载集成测试
// ==========================================
// 测试范围:
// 1. 配置文件 → AppState → FactoryApi 生效
// 2. 非法配置被拒绝
// ==========================================

mod helpers;

use std::io::Write;

use car_factory::app::AppState;
use car_factory::config::{config_keys, ConfigError, ConfigManager};
use helpers::test_data_builder::{CarOrderBuilder, EngineOrderBuilder};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("创建临时文件失败");
    file.write_all(content.as_bytes()).expect("写入临时文件失败");
    file
}

#[test]
fn test_app_state_applies_config_file() {
    let file = write_config(
        r#"{"annual_engine_plan": 4, "annual_car_plan": "2", "high_speed_threshold_kmh": 90.5}"#,
    );

    let state = AppState::new(file.path()).unwrap();
    assert_eq!(state.config_path.as_deref(), Some(file.path()));

    let api = &state.factory_api;
    assert_eq!(api.config().annual_engine_plan, 4);
    assert_eq!(api.config().annual_car_plan, 2);

    api.add_engine(EngineOrderBuilder::new("FO1").force(100).build()).unwrap();
    api.assemble_car(CarOrderBuilder::omnibus(2).top_speed(91.0).build())
        .unwrap();

    let compliance = api.plan_compliance().unwrap();
    assert_eq!(compliance.engine_percent, 25.0);
    assert_eq!(compliance.car_percent, 50.0);
    assert_eq!(api.high_speed_cars(None).unwrap().len(), 1, "阈值 90.5 生效");
    assert_eq!(state.action_log_repo.list_all().unwrap().len(), 2);
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let state = AppState::new(&path).unwrap();

    let config = state.factory_api.config();
    assert_eq!(config.annual_engine_plan, 1000);
    assert_eq!(config.annual_car_plan, 500);
    assert_eq!(config.high_speed_threshold_kmh, 150.0);
}

#[test]
fn test_zero_plan_rejected() {
    let file = write_config(r#"{"annual_car_plan": 0}"#);

    let err = AppState::new(file.path()).err().expect("计划为 0 应被拒绝");

    match err {
        ConfigError::Invalid { key, .. } => assert_eq!(key, config_keys::ANNUAL_CAR_PLAN),
        other => panic!("Expected Invalid, got {:?}", other),
    }
}

#[test]
fn test_malformed_config_file_rejected() {
    let file = write_config("annual_engine_plan = 10");

    let err = ConfigManager::from_file(file.path()).err().expect("格式错误应被拒绝");

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_runtime_override_then_rebuild_state() {
    let file = write_config(r#"{"annual_engine_plan": 10}"#);
    let manager = ConfigManager::from_file(file.path()).unwrap();

    manager
        .update_config(config_keys::HIGH_SPEED_THRESHOLD_KMH, "200")
        .unwrap();
    let state = AppState::with_manager(manager).unwrap();

    assert_eq!(state.factory_api.config().annual_engine_plan, 10);
    assert_eq!(state.factory_api.config().high_speed_threshold_kmh, 200.0);
    let snapshot = state.config_manager.get_config_snapshot().unwrap();
    assert_eq!(
        snapshot,
        r#"{"annual_engine_plan":"10","high_speed_threshold_kmh":"200"}"#
    );
}
