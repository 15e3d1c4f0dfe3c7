// ==========================================
// 供应商质量管理门户 - 绩效 API DTO 定义
// ==========================================
// 职责: 定义 PerformanceApi 的响应结构
// ==========================================

use crate::domain::performance::{
    DefectCount, MonthlyAggregate, ParetoRow, PeriodSummary, RankedSupplier,
};
use crate::domain::types::{MonthKey, PpmStatus, SupplierCategory};
use serde::{Deserialize, Serialize};

// ==========================================
// 供应商看板
// ==========================================

/// 月度 KPI 行（带目标判定）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyKpiRow {
    /// 自然月
    pub month: MonthKey,

    /// 显示标签 (例如 "Oct 2025")
    pub label: String,

    pub total_received: i64,
    pub total_target: i64,
    pub total_rejected: i64,
    pub total_complaints: i64,
    pub ppm: i64,
    pub delivery_pct: i64,

    /// 分类 PPM 目标 (未分类供应商为 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_ppm: Option<i64>,

    /// 目标判定 (未分类供应商为 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ppm_status: Option<PpmStatus>,
}

impl MonthlyKpiRow {
    pub fn from_aggregate(row: &MonthlyAggregate, target_ppm: Option<i64>) -> Self {
        Self {
            month: row.month,
            label: row.month.label(),
            total_received: row.total_received,
            total_target: row.total_target,
            total_rejected: row.total_rejected,
            total_complaints: row.total_complaints,
            ppm: row.ppm,
            delivery_pct: row.delivery_pct,
            target_ppm,
            ppm_status: target_ppm.map(|target| row.ppm_status(target)),
        }
    }
}

/// 供应商看板响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierDashboardResponse {
    pub supplier_id: String,

    /// 零件范围标签 ("Overall" 或具体零件名)
    pub part_scope: String,

    /// 月度 KPI，最近月份在前
    pub monthly: Vec<MonthlyKpiRow>,

    /// 不良原因分布，数量降序
    pub defects: Vec<DefectCount>,

    /// 该供应商出现过的零件 (升序)
    pub parts: Vec<String>,

    /// 查询时间戳 (ISO 8601)
    pub as_of: String,
}

// ==========================================
// 不良分析
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefectAnalysisResponse {
    pub supplier_id: String,
    pub part_scope: String,

    /// 参与统计的不良合计 (即各原因数量之和)
    pub total_quantity: i64,

    pub pareto: Vec<ParetoRow>,
}

// ==========================================
// 区间汇总
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummaryResponse {
    pub supplier_id: String,

    #[serde(flatten)]
    pub summary: PeriodSummary,
}

// ==========================================
// 分类排名
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRankingResponse {
    pub category: SupplierCategory,

    /// 实际使用的窗口月份数
    pub window_size: usize,

    /// 实际使用的质量分刻度
    pub ppm_per_quality_point: f64,

    pub rankings: Vec<RankedSupplier>,
}

/// 分类概览
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOverview {
    pub category: SupplierCategory,
    pub supplier_count: usize,
    pub target_ppm: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryOverviewResponse {
    pub categories: Vec<CategoryOverview>,

    /// 未分配分类的供应商数
    pub unassigned_count: usize,
}

/// 日报写入结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLogResponse {
    pub log_id: String,

    /// 是否覆盖了同键旧记录
    pub replaced: bool,
}
