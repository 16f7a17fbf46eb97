// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 语言环境变量
pub const LOCALE_ENV: &str = "CAR_FACTORY_LOCALE";

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["zh-CN", "en"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 按环境变量选择语言；未设置或不支持时保持默认
///
/// # 返回
/// 生效的语言代码
pub fn init_from_env() -> String {
    if let Ok(requested) = std::env::var(LOCALE_ENV) {
        match resolve_locale(&requested) {
            Some(locale) => set_locale(locale),
            None => tracing::warn!(requested = %requested, "不支持的语言，使用默认语言"),
        }
    }
    current_locale()
}

/// 规范化语言代码 ("en_US" / "EN" -> "en", "zh" -> "zh-CN")
pub fn resolve_locale(requested: &str) -> Option<&'static str> {
    let normalized = requested.trim().replace('_', "-").to_lowercase();
    if normalized.starts_with("zh") {
        Some("zh-CN")
    } else if normalized == "en" || normalized.starts_with("en-") {
        Some("en")
    } else {
        None
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use car_factory::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use car_factory::i18n::t_with_args;
/// let msg = t_with_args("message.engine_added", &[("code", "FO0000000001")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
