// ==========================================
// 供应商质量管理门户 - 日报筛选
// ==========================================
// 职责: 零件筛选、日期区间筛选、零件清单
// 输入: 日报切片
// 输出: 筛选后的日报副本 (不修改输入)
// ==========================================

use crate::domain::daily_log::DailyLog;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// "全部零件" 哨兵值
pub const ALL_PARTS: &str = "ALL";

// ==========================================
// PartFilter - 零件筛选
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PartFilter {
    #[default]
    All,
    Part(String),
}

impl PartFilter {
    /// 从可选字符串构造: None / "ALL" 表示不限
    pub fn from_option(part: Option<&str>) -> Self {
        match part {
            None => PartFilter::All,
            Some(p) if p == ALL_PARTS => PartFilter::All,
            Some(p) => PartFilter::Part(p.to_string()),
        }
    }

    /// 日报是否命中 (零件名精确匹配)
    pub fn matches(&self, log: &DailyLog) -> bool {
        match self {
            PartFilter::All => true,
            PartFilter::Part(name) => log.part_name == *name,
        }
    }

    /// 报表标题用: "Overall" 或零件名
    pub fn scope_label(&self) -> &str {
        match self {
            PartFilter::All => "Overall",
            PartFilter::Part(name) => name.as_str(),
        }
    }
}

// ==========================================
// DateRange - 日期区间 (闭区间,两端可缺省)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// 不限日期
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}

/// 按零件筛选
pub fn filter_by_part(logs: &[DailyLog], filter: &PartFilter) -> Vec<DailyLog> {
    logs.iter().filter(|log| filter.matches(log)).cloned().collect()
}

/// 按日期区间筛选,结果按日期升序 (同日保持输入顺序)
pub fn filter_by_date_range(logs: &[DailyLog], range: &DateRange) -> Vec<DailyLog> {
    let mut filtered: Vec<DailyLog> = logs
        .iter()
        .filter(|log| range.contains(log.date))
        .cloned()
        .collect();
    filtered.sort_by_key(|log| log.date);
    filtered
}

/// 日报中出现过的零件名 (去重、去空、升序)
pub fn unique_parts(logs: &[DailyLog]) -> Vec<String> {
    logs.iter()
        .map(|log| log.part_name.as_str())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(date: (i32, u32, u32), part: &str) -> DailyLog {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        DailyLog::new("SUP001", date, part, 100, 100, 0)
    }

    #[test]
    fn test_part_filter_all_sentinel() {
        assert_eq!(PartFilter::from_option(None), PartFilter::All);
        assert_eq!(PartFilter::from_option(Some("ALL")), PartFilter::All);
        assert_eq!(
            PartFilter::from_option(Some("Gear Shaft")),
            PartFilter::Part("Gear Shaft".to_string())
        );
    }

    #[test]
    fn test_filter_by_part() {
        let logs = vec![log((2025, 5, 1), "A"), log((2025, 5, 2), "B"), log((2025, 5, 3), "A")];
        assert_eq!(filter_by_part(&logs, &PartFilter::All).len(), 3);
        let only_a = filter_by_part(&logs, &PartFilter::Part("A".to_string()));
        assert_eq!(only_a.len(), 2);
        assert!(only_a.iter().all(|l| l.part_name == "A"));
        // 大小写敏感
        assert!(filter_by_part(&logs, &PartFilter::Part("a".to_string())).is_empty());
    }

    #[test]
    fn test_filter_by_date_range_inclusive_and_sorted() {
        let logs = vec![
            log((2025, 5, 20), "A"),
            log((2025, 5, 1), "A"),
            log((2025, 5, 10), "A"),
            log((2025, 6, 1), "A"),
        ];
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 5, 1),
            NaiveDate::from_ymd_opt(2025, 5, 20),
        );
        let filtered = filter_by_date_range(&logs, &range);
        let days: Vec<u32> = filtered.iter().map(|l| chrono::Datelike::day(&l.date)).collect();
        assert_eq!(days, vec![1, 10, 20]);

        let open_end = DateRange::new(NaiveDate::from_ymd_opt(2025, 5, 15), None);
        assert_eq!(filter_by_date_range(&logs, &open_end).len(), 2);
        assert_eq!(filter_by_date_range(&logs, &DateRange::unbounded()).len(), 4);
    }

    #[test]
    fn test_unique_parts() {
        let logs = vec![log((2025, 5, 1), "B"), log((2025, 5, 2), ""), log((2025, 5, 3), "A"), log((2025, 5, 4), "B")];
        assert_eq!(unique_parts(&logs), vec!["A".to_string(), "B".to_string()]);
        assert!(unique_parts(&[]).is_empty());
    }
}
