// ==========================================
// 集成测试辅助模块
// ==========================================

#![allow(dead_code)]

pub mod mock_config;

pub use mock_config::MockKpiConfig;
