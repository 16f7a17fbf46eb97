// ==========================================
// 汽车工厂生产线 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::FactoryApi;
use crate::config::{ConfigError, ConfigManager, FactoryConfig};
use crate::repository::action_log_repo::ActionLogRepository;

/// 应用状态
///
/// 包含API实例和共享资源
pub struct AppState {
    /// 配置文件路径 (文件可能不存在)
    pub config_path: Option<PathBuf>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 工厂API
    pub factory_api: Arc<FactoryApi>,

    /// 操作日志仓储（用于审计追踪）
    pub action_log_repo: Arc<ActionLogRepository>,
}

impl AppState {
    /// 从配置文件创建AppState
    ///
    /// # 说明
    /// 1. 加载配置 (文件不存在时使用默认值)
    /// 2. 校验并生成 FactoryConfig
    /// 3. 创建仓储与API实例
    pub fn new(config_path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("初始化AppState，配置路径: {}", config_path.display());

        let config_manager = ConfigManager::from_file(config_path)?;
        Self::with_manager(config_manager)
    }

    /// 以已构造的配置管理器创建
    pub fn with_manager(config_manager: ConfigManager) -> Result<Self, ConfigError> {
        let config = config_manager.to_factory_config()?;
        tracing::debug!(?config, "工厂配置");

        let config_path = config_manager.source().map(Path::to_path_buf);
        let action_log_repo = Arc::new(ActionLogRepository::new());
        let factory_api = Arc::new(FactoryApi::new(config, action_log_repo.clone()));

        Ok(Self {
            config_path,
            config_manager: Arc::new(config_manager),
            factory_api,
            action_log_repo,
        })
    }

    /// 以给定配置创建 (不读取文件)
    pub fn from_config(config: FactoryConfig) -> Self {
        let action_log_repo = Arc::new(ActionLogRepository::new());
        let factory_api = Arc::new(FactoryApi::new(config, action_log_repo.clone()));
        Self {
            config_path: None,
            config_manager: Arc::new(ConfigManager::new()),
            factory_api,
            action_log_repo,
        }
    }
}
