// ==========================================
// 供应商质量管理门户 - 演示数据库生成
// ==========================================
// 用法: seed_demo_db [db_path] [months]
// db_path 缺省取 app::get_default_db_path()
// 已存在的数据库会先备份为 {db_path}.bak.{时间戳}
// ==========================================

use anyhow::Context;
use chrono::{Datelike, Duration, Local, NaiveDate};
use std::fs;
use std::path::Path;

use supplier_quality_portal::app::get_default_db_path;
use supplier_quality_portal::repository::{DailyLogQuery, SupplierQuery};
use supplier_quality_portal::{
    logging, AppState, DailyLog, LegacyCauseAttribution, RejectionItem, Supplier, SupplierCategory,
};

const DEFAULT_MONTHS: i64 = 4;
const PARTS: [&str; 2] = ["Housing", "Gear Shaft"];
const CAUSES: [&str; 4] = ["Crack", "Burr", "Porosity", "Dimension"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(get_default_db_path);
    let months = std::env::args()
        .nth(2)
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(DEFAULT_MONTHS)
        .max(1);

    backup_and_reset_db(&db_path)?;
    let state = AppState::new(db_path.clone())?;

    let suppliers = vec![
        Supplier::new("SUP001", "Alpha Forge", Some(SupplierCategory::PreMachining)),
        Supplier::new("SUP002", "Beta Castings", Some(SupplierCategory::PreMachining)),
        Supplier::new("SUP003", "Gamma Precision", Some(SupplierCategory::ChildPart)),
        Supplier::new("SUP004", "Delta Components", Some(SupplierCategory::ChildPart)),
        Supplier::new("SUP005", "Epsilon Trading", None),
    ];
    for supplier in &suppliers {
        state.supplier_repo.upsert(supplier)?;
    }
    state
        .config_manager
        .set_legacy_attribution(LegacyCauseAttribution::FullQuantity)?;

    let today = Local::now().date_naive();
    let start = today - Duration::days(months * 30);
    let mut written = 0usize;

    for (supplier_idx, supplier) in suppliers.iter().enumerate() {
        let mut date = start;
        while date <= today {
            for (part_idx, part) in PARTS.iter().enumerate() {
                state
                    .daily_log_repo
                    .upsert(&demo_log(supplier, date, part, supplier_idx, part_idx))
                    .with_context(|| format!("写入日报失败: {} {}", supplier.supplier_id, date))?;
                written += 1;
            }
            date += Duration::days(1);
        }
    }

    print_quick_counts(&state)?;
    print_rankings(&state).await?;
    println!("Seeded {} daily logs into {}", written, db_path);
    Ok(())
}

async fn print_rankings(state: &AppState) -> anyhow::Result<()> {
    for category in SupplierCategory::ALL {
        let response = state.performance_api.get_category_rankings(category).await?;
        println!("[{}] window={} months", category, response.window_size);
        for entry in &response.rankings {
            println!(
                "  #{} {:<8} score={:>6.2} months={}",
                entry.rank, entry.supplier_id, entry.average_score, entry.months_counted
            );
        }
    }
    Ok(())
}

/// 生成确定性的演示日报: 供应商序号越大,不良越多
fn demo_log(
    supplier: &Supplier,
    date: NaiveDate,
    part: &str,
    supplier_idx: usize,
    part_idx: usize,
) -> DailyLog {
    let day = date.ordinal() as i64;
    let target = 400 + 100 * part_idx as i64;
    let received = target - (day + supplier_idx as i64) % 40;
    let rejected = (day * (supplier_idx as i64 + 1)) % 7;

    let log = DailyLog::new(&supplier.supplier_id, date, part, received, target, rejected);
    if rejected == 0 {
        return log;
    }

    // 旧数据只有摘要文本,用于覆盖两种不良记录形态
    if day % 5 == 0 {
        let summary = format!("{}, {}", CAUSES[day as usize % 4], CAUSES[(day as usize + 1) % 4]);
        return log.with_summary(summary);
    }

    let first = rejected / 2 + rejected % 2;
    let mut items = vec![RejectionItem::new(CAUSES[supplier_idx % 4], first)];
    if rejected - first > 0 {
        items.push(RejectionItem::new(CAUSES[(supplier_idx + 1) % 4], rejected - first));
    }
    log.with_breakdown(items)
}

fn backup_and_reset_db(db_path: &str) -> anyhow::Result<()> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}

fn print_quick_counts(state: &AppState) -> anyhow::Result<()> {
    for supplier in state.supplier_repo.list_all()? {
        let logs = state.daily_log_repo.list_by_supplier(&supplier.supplier_id)?;
        let category = supplier
            .category
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<18} {:<14} logs={}",
            supplier.supplier_id,
            supplier.display_name,
            category,
            logs.len()
        );
    }
    Ok(())
}
