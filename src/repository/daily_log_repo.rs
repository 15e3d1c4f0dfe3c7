// ==========================================
// 供应商质量管理门户 - 日报数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 覆写语义: (supplier_id, log_date, part_name) 相同则替换整条记录
//           同一 log_id 写到新键时,旧键记录移除
// ==========================================

use crate::domain::daily_log::{DailyLog, RejectionItem};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::store::{DailyLogQuery, DailyLogWriter};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_COLUMNS: &str = r#"
    SELECT
        log_id, supplier_id, log_date, part_name,
        received_qty, target_qty, rejected_qty,
        rejection_breakdown, rejection_summary,
        complaints_count, complaint_detail, remarks
    FROM daily_log
"#;

// ==========================================
// DailyLogRepository - 日报仓储
// ==========================================
/// 日报仓储
/// 职责: 管理 daily_log 表的读写
pub struct DailyLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DailyLogRepository {
    /// 创建新的 DailyLogRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 写入日报 (同键覆写)
    ///
    /// 同一 log_id 已存在于其他键 (例如改正了日期或零件) 时,旧键记录随之移除
    ///
    /// # 返回
    /// - Ok(true): 替换了已有记录
    /// - Ok(false): 新增记录
    pub fn upsert(&self, log: &DailyLog) -> RepositoryResult<bool> {
        let breakdown_json = serde_json::to_string(&log.rejection_breakdown)?;
        let date_str = log.date.format(DATE_FORMAT).to_string();
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let existed: bool = tx
            .query_row(
                "SELECT 1 FROM daily_log WHERE supplier_id = ?1 AND log_date = ?2 AND part_name = ?3",
                params![log.supplier_id, date_str, log.part_name],
                |_row| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        let moved = tx.execute(
            r#"
            DELETE FROM daily_log
            WHERE log_id = ?1
              AND NOT (supplier_id = ?2 AND log_date = ?3 AND part_name = ?4)
            "#,
            params![log.log_id, log.supplier_id, date_str, log.part_name],
        )?;

        tx.execute(
            r#"
            INSERT INTO daily_log (
                log_id, supplier_id, log_date, part_name,
                received_qty, target_qty, rejected_qty,
                rejection_breakdown, rejection_summary,
                complaints_count, complaint_detail, remarks
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ON CONFLICT(supplier_id, log_date, part_name) DO UPDATE SET
                log_id = excluded.log_id,
                received_qty = excluded.received_qty,
                target_qty = excluded.target_qty,
                rejected_qty = excluded.rejected_qty,
                rejection_breakdown = excluded.rejection_breakdown,
                rejection_summary = excluded.rejection_summary,
                complaints_count = excluded.complaints_count,
                complaint_detail = excluded.complaint_detail,
                remarks = excluded.remarks,
                updated_at = datetime('now')
            "#,
            params![
                log.log_id,
                log.supplier_id,
                date_str,
                log.part_name,
                log.received_qty,
                log.target_qty,
                log.rejected_qty,
                breakdown_json,
                log.rejection_summary,
                log.complaints_count,
                log.complaint_detail,
                log.remarks,
            ],
        )?;

        tx.commit()?;

        if moved > 0 {
            tracing::debug!(
                log_id = %log.log_id,
                supplier_id = %log.supplier_id,
                date = %date_str,
                part_name = %log.part_name,
                "日报键已更正,旧键记录已移除"
            );
        } else if existed {
            tracing::debug!(
                supplier_id = %log.supplier_id,
                date = %date_str,
                part_name = %log.part_name,
                "日报已覆写"
            );
        }
        Ok(existed || moved > 0)
    }

    /// 按唯一键查询
    ///
    /// # 返回
    /// - Ok(Some(DailyLog)): 找到记录
    /// - Ok(None): 未找到
    pub fn find_by_key(
        &self,
        supplier_id: &str,
        date: NaiveDate,
        part_name: &str,
    ) -> RepositoryResult<Option<DailyLog>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} WHERE supplier_id = ?1 AND log_date = ?2 AND part_name = ?3",
            SELECT_COLUMNS
        );
        let log = conn
            .query_row(
                &sql,
                params![supplier_id, date.format(DATE_FORMAT).to_string(), part_name],
                map_daily_log_row,
            )
            .optional()?;
        Ok(log)
    }

    /// 按唯一键删除
    ///
    /// # 返回
    /// 是否删除了记录
    pub fn delete_by_key(
        &self,
        supplier_id: &str,
        date: NaiveDate,
        part_name: &str,
    ) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM daily_log WHERE supplier_id = ?1 AND log_date = ?2 AND part_name = ?3",
            params![supplier_id, date.format(DATE_FORMAT).to_string(), part_name],
        )?;
        Ok(affected > 0)
    }
}

impl DailyLogQuery for DailyLogRepository {
    fn list_by_supplier(&self, supplier_id: &str) -> RepositoryResult<Vec<DailyLog>> {
        self.list_by_supplier_in_range(supplier_id, None, None)
    }

    fn list_by_supplier_in_range(
        &self,
        supplier_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RepositoryResult<Vec<DailyLog>> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"{}
            WHERE supplier_id = ?1
              AND (?2 IS NULL OR log_date >= ?2)
              AND (?3 IS NULL OR log_date <= ?3)
            ORDER BY log_date ASC, part_name ASC
            "#,
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;

        let logs = stmt
            .query_map(
                params![
                    supplier_id,
                    start.map(|d| d.format(DATE_FORMAT).to_string()),
                    end.map(|d| d.format(DATE_FORMAT).to_string()),
                ],
                map_daily_log_row,
            )?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(logs)
    }
}

impl DailyLogWriter for DailyLogRepository {
    fn upsert(&self, log: &DailyLog) -> RepositoryResult<bool> {
        DailyLogRepository::upsert(self, log)
    }
}

/// 行映射: 数据库行 → DailyLog (规范化唯一形态)
fn map_daily_log_row(row: &Row<'_>) -> SqliteResult<DailyLog> {
    let date_str: String = row.get(2)?;
    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    let breakdown_json: String = row.get(7)?;
    let rejection_breakdown: Vec<RejectionItem> = serde_json::from_str(&breakdown_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e)))?;

    Ok(DailyLog {
        log_id: row.get(0)?,
        supplier_id: row.get(1)?,
        date,
        part_name: row.get(3)?,
        received_qty: row.get(4)?,
        target_qty: row.get(5)?,
        rejected_qty: row.get(6)?,
        rejection_breakdown,
        rejection_summary: row.get(8)?,
        complaints_count: row.get(9)?,
        complaint_detail: row.get(10)?,
        remarks: row.get(11)?,
    })
}
