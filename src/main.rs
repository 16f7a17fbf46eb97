// ==========================================
// 汽车工厂生产线 - 控制台主入口
// ==========================================

use std::io;

use anyhow::Context;
use car_factory::app::{AppState, Console};
use car_factory::config::get_default_config_path;
use car_factory::{i18n, logging};

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 版本: {}", car_factory::APP_NAME, car_factory::VERSION);
    tracing::info!("==================================================");

    let locale = i18n::init_from_env();
    tracing::info!("使用语言: {}", locale);

    // 加载配置
    let config_path = get_default_config_path();
    let app_state = AppState::new(&config_path)
        .with_context(|| format!("无法初始化AppState: {}", config_path.display()))?;
    tracing::info!("AppState初始化成功");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(app_state.factory_api.as_ref(), stdin.lock(), stdout.lock());
    console.run()?;

    let counters = app_state.factory_api.production_counters()?;
    tracing::info!(
        engines_produced = counters.engines_produced,
        cars_produced = counters.cars_produced,
        "退出"
    );
    Ok(())
}
