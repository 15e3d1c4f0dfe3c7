// ==========================================
// 供应商质量管理门户 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// 红线: 非法配置值回退默认值并告警,不中断读取
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::kpi_config_trait::KpiConfigReader;
use crate::config::ranking_profile::RankingParameters;
use crate::db::open_sqlite_connection;
use crate::domain::types::SupplierCategory;
use crate::engine::defect_breakdown::LegacyCauseAttribution;
use crate::engine::ranking::{DEFAULT_PPM_PER_QUALITY_POINT, DEFAULT_WINDOW_SIZE};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// Pre-Machining 默认月度 PPM 目标
pub const DEFAULT_PRE_MACHINING_PPM_TARGET: i64 = 2_000;

/// Child-Part 默认月度 PPM 目标 (零缺陷)
pub const DEFAULT_CHILD_PART_PPM_TARGET: i64 = 0;

/// 快照中不回写的元信息键前缀
const META_KEY_PREFIX: &str = "__meta_";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| ConfigError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    fn get_conn(&self) -> ConfigResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        tracing::info!(config_key = key, value, "配置已更新");
        Ok(())
    }

    /// 读取并解析配置值，缺失或非法时回退默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr + Copy,
    {
        let raw = match self.get_global_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };
        match raw.trim().parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => {
                tracing::warn!(config_key = key, raw_value = %raw, "配置值格式错误，使用默认值");
                Ok(default)
            }
        }
    }

    // ===== 写入便捷方法 =====

    /// 设置分类的月度 PPM 目标
    pub fn set_ppm_target(&self, category: SupplierCategory, target_ppm: i64) -> ConfigResult<()> {
        if target_ppm < 0 {
            return Err(ConfigError::InvalidValue {
                key: config_keys::ppm_target_key(category).to_string(),
                message: format!("PPM 目标不能为负数: {}", target_ppm),
            });
        }
        self.set_global_config_value(config_keys::ppm_target_key(category), &target_ppm.to_string())
    }

    /// 设置排名参数
    pub fn set_ranking_parameters(&self, parameters: &RankingParameters) -> ConfigResult<()> {
        if !(parameters.ppm_per_quality_point.is_finite() && parameters.ppm_per_quality_point > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: config_keys::RANKING_PPM_PER_QUALITY_POINT.to_string(),
                message: format!("质量分刻度必须为正数: {}", parameters.ppm_per_quality_point),
            });
        }
        self.set_global_config_value(
            config_keys::RANKING_WINDOW_MONTHS,
            &parameters.window_size.to_string(),
        )?;
        self.set_global_config_value(
            config_keys::RANKING_PPM_PER_QUALITY_POINT,
            &parameters.ppm_per_quality_point.to_string(),
        )
    }

    /// 设置旧版摘要数量分配方式
    pub fn set_legacy_attribution(&self, attribution: LegacyCauseAttribution) -> ConfigResult<()> {
        self.set_global_config_value(config_keys::LEGACY_CAUSE_ATTRIBUTION, &attribution.to_string())
    }

    // ===== 快照 =====

    /// 获取所有 global 配置的快照（JSON格式，键有序）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let config_map = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<rusqlite::Result<BTreeMap<String, String>>>()?;

        Ok(serde_json::to_string(&config_map)?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    ///
    /// # 注意
    /// - 覆盖现有同名 global 配置，快照外的键保持不变
    /// - `__meta_` 前缀的键不回写
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<usize> {
        let config_map: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;

        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for (key, value) in config_map.iter() {
            if key.starts_with(META_KEY_PREFIX) {
                continue;
            }
            count += tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
                params![key, value],
            )?;
        }

        tx.commit()?;
        tracing::info!(restored = count, "配置快照已恢复");
        Ok(count)
    }
}

// ==========================================
// KpiConfigReader Trait 实现
// ==========================================
#[async_trait]
impl KpiConfigReader for ConfigManager {
    async fn get_ppm_target(&self, category: SupplierCategory) -> ConfigResult<i64> {
        let default = match category {
            SupplierCategory::PreMachining => DEFAULT_PRE_MACHINING_PPM_TARGET,
            SupplierCategory::ChildPart => DEFAULT_CHILD_PART_PPM_TARGET,
        };
        self.get_parsed_or_default(config_keys::ppm_target_key(category), default)
    }

    async fn get_ranking_window(&self) -> ConfigResult<usize> {
        self.get_parsed_or_default(config_keys::RANKING_WINDOW_MONTHS, DEFAULT_WINDOW_SIZE)
    }

    async fn get_ppm_per_quality_point(&self) -> ConfigResult<f64> {
        let value = self.get_parsed_or_default(
            config_keys::RANKING_PPM_PER_QUALITY_POINT,
            DEFAULT_PPM_PER_QUALITY_POINT,
        )?;
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            tracing::warn!(
                config_key = config_keys::RANKING_PPM_PER_QUALITY_POINT,
                value,
                "质量分刻度必须为正数，使用默认值"
            );
            Ok(DEFAULT_PPM_PER_QUALITY_POINT)
        }
    }

    async fn get_legacy_attribution(&self) -> ConfigResult<LegacyCauseAttribution> {
        let value = self.get_global_config_value(config_keys::LEGACY_CAUSE_ATTRIBUTION)?;
        Ok(value
            .map(|v| LegacyCauseAttribution::from_str(&v))
            .unwrap_or_default())
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    use crate::domain::types::SupplierCategory;

    // 月度 PPM 目标
    pub const PPM_TARGET_PRE_MACHINING: &str = "ppm_target_pre_machining";
    pub const PPM_TARGET_CHILD_PART: &str = "ppm_target_child_part";

    // 排名
    pub const RANKING_WINDOW_MONTHS: &str = "ranking_window_months";
    pub const RANKING_PPM_PER_QUALITY_POINT: &str = "ranking_ppm_per_quality_point";

    // 不良分析
    pub const LEGACY_CAUSE_ATTRIBUTION: &str = "legacy_cause_attribution";

    pub fn ppm_target_key(category: SupplierCategory) -> &'static str {
        match category {
            SupplierCategory::PreMachining => PPM_TARGET_PRE_MACHINING,
            SupplierCategory::ChildPart => PPM_TARGET_CHILD_PART,
        }
    }
}
