// ==========================================
// 供应商质量管理门户 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 约定: 所有 Repository 与 ConfigManager 共享同一个 SQLite 连接
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;

use crate::api::PerformanceApi;
use crate::config::config_manager::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection};
use crate::repository::{DailyLogRepository, SupplierRepository};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 绩效API
    pub performance_api: Arc<PerformanceApi>,

    /// 配置管理器（供设置页写入）
    pub config_manager: Arc<ConfigManager>,

    /// 供应商仓储（供应商主数据维护）
    pub supplier_repo: Arc<SupplierRepository>,

    /// 日报仓储
    pub daily_log_repo: Arc<DailyLogRepository>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// 打开数据库、幂等建表,然后组装 Repository 与 API
    pub fn new(db_path: impl Into<String>) -> anyhow::Result<Self> {
        let db_path = db_path.into();
        tracing::info!(db_path = %db_path, "初始化AppState");

        let conn = open_sqlite_connection(&db_path)
            .with_context(|| format!("无法打开数据库: {}", db_path))?;
        init_schema(&conn).context("数据库 schema 初始化失败")?;
        let conn = Arc::new(Mutex::new(conn));

        let daily_log_repo = Arc::new(DailyLogRepository::from_connection(conn.clone()));
        let supplier_repo = Arc::new(SupplierRepository::from_connection(conn.clone()));
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn).context("无法创建ConfigManager")?,
        );

        let performance_api = Arc::new(PerformanceApi::new(
            daily_log_repo.clone(),
            daily_log_repo.clone(),
            supplier_repo.clone(),
            config_manager.clone(),
        ));

        tracing::info!("AppState初始化完成");
        Ok(Self {
            db_path,
            performance_api,
            config_manager,
            supplier_repo,
            daily_log_repo,
        })
    }
}

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "SUPPLIER_PORTAL_DB_PATH";

/// 默认数据库路径
///
/// 优先级: 环境变量 > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let fallback = PathBuf::from("./supplier_portal.db");
    let Some(data_dir) = dirs::data_dir() else {
        return fallback.to_string_lossy().into_owned();
    };

    let dir = data_dir.join("supplier-quality-portal");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(dir = %dir.display(), error = %e, "无法创建数据目录，使用当前目录");
        return fallback.to_string_lossy().into_owned();
    }
    dir.join("supplier_portal.db").to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_db_path_env_override() {
        std::env::set_var(DB_PATH_ENV, "  /tmp/portal_test.db ");
        assert_eq!(get_default_db_path(), "/tmp/portal_test.db");
        std::env::remove_var(DB_PATH_ENV);
    }

    #[test]
    fn test_app_state_on_memory_db() {
        let state = AppState::new(":memory:").unwrap();
        assert!(state
            .supplier_repo
            .get_by_id("SUP001")
            .is_err());
    }
}
