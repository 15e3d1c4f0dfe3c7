// ==========================================
// 供应商质量管理门户 - 绩效派生对象
// ==========================================
// 职责: 月度汇总、不良分布、排名结果等派生数据结构
// 红线: 均为按需重算的派生数据,不作为权威状态存储
// ==========================================

use crate::domain::types::{MonthKey, PpmStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// MonthlyAggregate - 月度汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// 自然月
    pub month: MonthKey,

    /// 实收合计
    pub total_received: i64,

    /// 计划合计
    pub total_target: i64,

    /// 不良合计
    pub total_rejected: i64,

    /// 客诉合计
    pub total_complaints: i64,

    /// 不良率 (百万分之)
    pub ppm: i64,

    /// 交付率 (%),不截断
    pub delivery_pct: i64,
}

impl MonthlyAggregate {
    /// 按 PPM 目标判定
    pub fn ppm_status(&self, target_ppm: i64) -> PpmStatus {
        PpmStatus::classify(self.ppm, target_ppm)
    }

    /// 本月是否无任何收货与计划
    pub fn is_idle(&self) -> bool {
        self.total_received == 0 && self.total_target == 0
    }
}

// ==========================================
// DefectCount - 不良原因计数
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectCount {
    pub cause: String,
    pub quantity: i64,
}

/// 帕累托分析行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoRow {
    /// 不良原因
    pub cause: String,
    /// 数量
    pub quantity: i64,
    /// 占比 (%)
    pub share_pct: f64,
    /// 累计占比 (%)
    pub cumulative_pct: f64,
}

// ==========================================
// RankedSupplier - 排名结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSupplier {
    /// 供应商ID
    pub supplier_id: String,

    /// 显示名称
    pub display_name: String,

    /// 窗口期平均综合得分 (0-100)
    pub average_score: f64,

    /// 参与计算的月份数
    pub months_counted: usize,

    /// 名次 (从 1 开始)
    pub rank: usize,
}

// ==========================================
// PeriodSummary - 区间汇总 (日报视图)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub part_name: String,
    pub received_qty: i64,
    pub rejected_qty: i64,
    /// 单日不良率 (%),两位小数
    pub rejection_rate_pct: f64,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// 区间起始 (None 表示不限)
    pub start: Option<NaiveDate>,
    /// 区间结束 (None 表示不限)
    pub end: Option<NaiveDate>,
    /// 实收合计
    pub total_received: i64,
    /// 不良合计
    pub total_rejected: i64,
    /// 区间不良率 (%),两位小数
    pub rejection_rate_pct: f64,
    /// 按日期升序的明细
    pub rows: Vec<DailyRow>,
}
