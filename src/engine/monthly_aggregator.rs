// ==========================================
// 供应商质量管理门户 - 月度汇总引擎
// ==========================================
// 职责: 将单个供应商的日报按自然月汇总为 KPI 行
// 输入: 日报列表 + 零件筛选
// 输出: 按月份升序的 MonthlyAggregate 列表
// ==========================================
// 取整规则: f64::round (四舍五入,.5 远离零),所有派生比率一致使用
// 零分母: 比率记 0,不报错
// 合计溢出: 在 i64 边界处饱和,不 panic
// ==========================================

use crate::domain::daily_log::DailyLog;
use crate::domain::performance::MonthlyAggregate;
use crate::domain::types::MonthKey;
use crate::engine::log_filter::PartFilter;
use std::collections::BTreeMap;

/// PPM 换算系数
pub const PPM_SCALE: f64 = 1_000_000.0;

/// 百分比换算系数
pub const PERCENT_SCALE: f64 = 100.0;

/// 按比例换算并取整; 分母 <= 0 时返回 0
pub fn scaled_ratio(numerator: i64, denominator: i64, scale: f64) -> i64 {
    if denominator > 0 {
        (numerator as f64 / denominator as f64 * scale).round() as i64
    } else {
        0
    }
}

/// 不良率 PPM = round(rejected / received * 1_000_000)
///
/// 不良数超过收货数时结果可大于 1_000_000 (数据质量问题,不是错误)
pub fn ppm(total_rejected: i64, total_received: i64) -> i64 {
    scaled_ratio(total_rejected, total_received, PPM_SCALE)
}

/// 交付率 = round(received / target * 100),超交时大于 100,不截断
pub fn delivery_pct(total_received: i64, total_target: i64) -> i64 {
    scaled_ratio(total_received, total_target, PERCENT_SCALE)
}

#[derive(Debug, Default, Clone, Copy)]
struct MonthTotals {
    received: i64,
    target: i64,
    rejected: i64,
    complaints: i64,
}

// ==========================================
// MonthlyAggregator - 月度汇总引擎
// ==========================================
pub struct MonthlyAggregator {
    // 无状态引擎
}

impl MonthlyAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 汇总日报为月度 KPI
    ///
    /// # 参数
    /// - `logs`: 单个供应商的日报 (顺序无关)
    /// - `part`: 零件筛选,`PartFilter::All` 表示不限
    ///
    /// # 返回
    /// 按月份升序的汇总行; 输入为空 (或筛选后为空) 时返回空列表
    pub fn aggregate(&self, logs: &[DailyLog], part: &PartFilter) -> Vec<MonthlyAggregate> {
        let mut buckets: BTreeMap<MonthKey, MonthTotals> = BTreeMap::new();

        for log in logs.iter().filter(|log| part.matches(log)) {
            let totals = buckets.entry(MonthKey::from_date(log.date)).or_default();
            totals.received = totals.received.saturating_add(log.received_qty);
            totals.target = totals.target.saturating_add(log.target_qty);
            totals.rejected = totals.rejected.saturating_add(log.rejected_qty);
            totals.complaints = totals.complaints.saturating_add(log.complaints_count);
        }

        // BTreeMap 按 MonthKey 有序,即时间升序
        buckets
            .into_iter()
            .map(|(month, totals)| MonthlyAggregate {
                month,
                total_received: totals.received,
                total_target: totals.target,
                total_rejected: totals.rejected,
                total_complaints: totals.complaints,
                ppm: ppm(totals.rejected, totals.received),
                delivery_pct: delivery_pct(totals.received, totals.target),
            })
            .collect()
    }

    /// 汇总单个月份 (月份内无日报时返回 None)
    pub fn aggregate_month(
        &self,
        logs: &[DailyLog],
        part: &PartFilter,
        month: MonthKey,
    ) -> Option<MonthlyAggregate> {
        self.aggregate(logs, part)
            .into_iter()
            .find(|row| row.month == month)
    }

    /// 转为最近月份在前 (汇总表展示用)
    pub fn most_recent_first(rows: Vec<MonthlyAggregate>) -> Vec<MonthlyAggregate> {
        let mut rows = rows;
        rows.reverse();
        rows
    }
}

impl Default for MonthlyAggregator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn log(date: (i32, u32, u32), part: &str, received: i64, target: i64, rejected: i64) -> DailyLog {
        DailyLog::new(
            "SUP001",
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            part,
            received,
            target,
            rejected,
        )
    }

    #[test]
    fn test_empty_logs_yield_empty_rows() {
        let engine = MonthlyAggregator::new();
        assert!(engine.aggregate(&[], &PartFilter::All).is_empty());
    }

    #[test]
    fn test_two_logs_same_month() {
        let engine = MonthlyAggregator::new();
        let logs = vec![
            log((2025, 10, 3), "Housing", 100, 100, 5),
            log((2025, 10, 17), "Housing", 200, 200, 15),
        ];

        let rows = engine.aggregate(&logs, &PartFilter::All);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.month, MonthKey::new(2025, 10));
        assert_eq!(row.total_received, 300);
        assert_eq!(row.total_target, 300);
        assert_eq!(row.total_rejected, 20);
        assert_eq!(row.ppm, 66667); // round(20/300*1e6)
        assert_eq!(row.delivery_pct, 100);
    }

    #[test]
    fn test_zero_received_gives_zero_ppm() {
        let engine = MonthlyAggregator::new();
        let logs = vec![log((2025, 1, 5), "A", 0, 50, 7)];

        let rows = engine.aggregate(&logs, &PartFilter::All);

        assert_eq!(rows[0].ppm, 0);
        assert_eq!(rows[0].delivery_pct, 0);
    }

    #[test]
    fn test_idle_month_is_zero_not_perfect() {
        let engine = MonthlyAggregator::new();
        let logs = vec![log((2025, 1, 5), "A", 0, 0, 0)];

        let rows = engine.aggregate(&logs, &PartFilter::All);

        assert!(rows[0].is_idle());
        assert_eq!(rows[0].ppm, 0);
        assert_eq!(rows[0].delivery_pct, 0);
    }

    #[test]
    fn test_delivery_pct_not_clamped() {
        let engine = MonthlyAggregator::new();
        let logs = vec![log((2025, 2, 1), "A", 120, 100, 0)];

        let rows = engine.aggregate(&logs, &PartFilter::All);

        assert_eq!(rows[0].delivery_pct, 120);
    }

    #[test]
    fn test_ppm_may_exceed_one_million() {
        assert_eq!(ppm(150, 100), 1_500_000);
    }

    #[test]
    fn test_ppm_monotonic_in_rejected() {
        let received = 777;
        let mut previous = ppm(0, received);
        for rejected in 1..=2000 {
            let current = ppm(rejected, received);
            assert!(current >= previous, "rejected={} ppm={} < {}", rejected, current, previous);
            previous = current;
        }
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // 1/8 * 100 = 12.5 → 13
        assert_eq!(delivery_pct(1, 8), 13);
        // 3/8 * 100 = 37.5 → 38
        assert_eq!(delivery_pct(3, 8), 38);
        // 负数不校验,原样参与计算: -1/8 * 100 = -12.5 → -13
        assert_eq!(delivery_pct(-1, 8), -13);
    }

    #[test]
    fn test_months_sorted_chronologically() {
        let engine = MonthlyAggregator::new();
        let logs = vec![
            log((2025, 8, 1), "A", 10, 10, 0),
            log((2024, 12, 31), "A", 10, 10, 0),
            log((2025, 4, 15), "A", 10, 10, 0),
        ];

        let rows = engine.aggregate(&logs, &PartFilter::All);
        let months: Vec<String> = rows.iter().map(|r| r.month.to_string()).collect();
        assert_eq!(months, vec!["2024-12", "2025-04", "2025-08"]);

        let desc = MonthlyAggregator::most_recent_first(rows);
        assert_eq!(desc[0].month, MonthKey::new(2025, 8));
        assert_eq!(desc[2].month, MonthKey::new(2024, 12));
    }

    #[test]
    fn test_part_filter_restricts_buckets() {
        let engine = MonthlyAggregator::new();
        let mut with_complaint = log((2025, 3, 2), "Gear Shaft", 100, 200, 10);
        with_complaint.complaints_count = 2;
        let logs = vec![
            log((2025, 3, 1), "Housing", 100, 100, 1),
            with_complaint,
            log((2025, 4, 1), "Housing", 100, 100, 1),
        ];

        let rows = engine.aggregate(&logs, &PartFilter::Part("Gear Shaft".to_string()));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_received, 100);
        assert_eq!(rows[0].total_complaints, 2);
        assert_eq!(rows[0].ppm, 100_000);
        assert_eq!(rows[0].delivery_pct, 50);

        let all = engine.aggregate(&logs, &PartFilter::All);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].total_received, 200);
    }

    #[test]
    fn test_aggregate_month() {
        let engine = MonthlyAggregator::new();
        let logs = vec![log((2025, 3, 1), "A", 100, 100, 1)];
        assert!(engine
            .aggregate_month(&logs, &PartFilter::All, MonthKey::new(2025, 3))
            .is_some());
        assert!(engine
            .aggregate_month(&logs, &PartFilter::All, MonthKey::new(2025, 4))
            .is_none());
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let engine = MonthlyAggregator::new();
        let logs = vec![
            log((2025, 6, 1), "A", i64::MAX, i64::MAX, 1),
            log((2025, 6, 2), "A", 1, 1, i64::MAX),
        ];

        let rows = engine.aggregate(&logs, &PartFilter::All);

        assert_eq!(rows[0].total_received, i64::MAX);
        assert_eq!(rows[0].total_target, i64::MAX);
        assert_eq!(rows[0].total_rejected, i64::MAX);
        assert_eq!(rows[0].ppm, 1_000_000);
        assert_eq!(rows[0].delivery_pct, 100);
    }
}
