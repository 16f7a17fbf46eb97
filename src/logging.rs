// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别
// 输出到 stderr，stdout 留给控制台菜单
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 日志格式环境变量 (`json` 输出结构化日志)
pub const LOG_FORMAT_ENV: &str = "CAR_FACTORY_LOG_FORMAT";

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: warn，避免打断交互菜单）
///   例如: RUST_LOG=debug 或 RUST_LOG=car_factory=trace
/// - CAR_FACTORY_LOG_FORMAT=json: JSON 行格式
///
/// # 示例
/// ```no_run
/// use car_factory::logging;
/// logging::init();
/// ```
pub fn init() {
    // 从环境变量读取日志级别，默认为 warn
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // 重复初始化时忽略 (例如嵌入到其他程序)
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
