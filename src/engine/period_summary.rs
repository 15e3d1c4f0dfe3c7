// ==========================================
// 供应商质量管理门户 - 区间汇总引擎
// ==========================================
// 职责: 日报视图的区间合计与不良率
// 输入: 日报 + 日期区间
// 输出: PeriodSummary (明细按日期升序)
// ==========================================

use crate::domain::daily_log::DailyLog;
use crate::domain::performance::{DailyRow, PeriodSummary};
use crate::domain::types::saturating_total;
use crate::engine::log_filter::{filter_by_date_range, DateRange};

/// 不良率 (%),两位小数; 收货数 <= 0 时为 0
pub fn rejection_rate_pct(rejected: i64, received: i64) -> f64 {
    if received > 0 {
        (rejected as f64 / received as f64 * 100.0 * 100.0).round() / 100.0
    } else {
        0.0
    }
}

/// 生成区间汇总
pub fn summarize_period(logs: &[DailyLog], range: &DateRange) -> PeriodSummary {
    let filtered = filter_by_date_range(logs, range);

    let total_received = saturating_total(filtered.iter().map(|log| log.received_qty));
    let total_rejected = saturating_total(filtered.iter().map(|log| log.rejected_qty));

    let rows = filtered
        .into_iter()
        .map(|log| DailyRow {
            rejection_rate_pct: rejection_rate_pct(log.rejected_qty, log.received_qty),
            date: log.date,
            part_name: log.part_name,
            received_qty: log.received_qty,
            rejected_qty: log.rejected_qty,
            remarks: log.remarks,
        })
        .collect();

    PeriodSummary {
        start: range.start,
        end: range.end,
        total_received,
        total_rejected,
        rejection_rate_pct: rejection_rate_pct(total_rejected, total_received),
        rows,
    }
}
