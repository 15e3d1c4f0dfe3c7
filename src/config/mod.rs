// ==========================================
// 供应商质量管理门户 - 配置层
// ==========================================
// 职责: 系统配置管理 (PPM 目标、排名参数、不良分析口径)
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod error;
pub mod kpi_config_trait;
pub mod ranking_profile;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use kpi_config_trait::KpiConfigReader;
pub use ranking_profile::RankingParameters;
