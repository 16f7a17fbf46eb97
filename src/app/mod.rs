// ==========================================
// 汽车工厂生产线 - 应用层
// ==========================================
// 职责: 应用状态装配 + 控制台菜单
// ==========================================

pub mod console;
pub mod state;

// 重导出
pub use console::{Console, MenuOption};
pub use state::AppState;
