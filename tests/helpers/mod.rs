// ==========================================
// 集成测试公共辅助模块
// ==========================================
// 各测试文件按需使用，未用到的辅助函数不告警
// ==========================================

#![allow(dead_code)]

pub mod api_test_helper;
pub mod test_data_builder;
