// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据生成等功能
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use rusqlite::Connection;
use std::error::Error;
use supplier_quality_portal::db::{init_schema, open_sqlite_connection};
use supplier_quality_portal::{DailyLog, RejectionItem};
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径不是合法 UTF-8")?
        .to_string();

    let conn = open_test_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试数据库连接
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(open_sqlite_connection(db_path)?)
}

/// 写入一条 global 配置
pub fn insert_config(conn: &Connection, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT OR REPLACE INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
        [key, value],
    )?;
    Ok(())
}

/// 日期简写
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("invalid test date")
}

/// 构造一条带结构化明细的日报 (不良总数 = 明细合计)
pub fn log_with_breakdown(
    supplier_id: &str,
    date: NaiveDate,
    part: &str,
    received: i64,
    target: i64,
    breakdown: &[(&str, i64)],
) -> DailyLog {
    let items: Vec<RejectionItem> = breakdown
        .iter()
        .map(|(cause, qty)| RejectionItem::new(*cause, *qty))
        .collect();
    let rejected = items.iter().map(|i| i.qty).sum();
    DailyLog::new(supplier_id, date, part, received, target, rejected).with_breakdown(items)
}

/// 构造一条只有旧版摘要的日报
pub fn log_with_summary(
    supplier_id: &str,
    date: NaiveDate,
    part: &str,
    received: i64,
    target: i64,
    rejected: i64,
    summary: &str,
) -> DailyLog {
    DailyLog::new(supplier_id, date, part, received, target, rejected).with_summary(summary)
}
