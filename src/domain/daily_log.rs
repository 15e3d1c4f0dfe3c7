// ==========================================
// 供应商质量管理门户 - 日报记录
// ==========================================
// 职责: 定义供应商每日提交的生产/质量记录
// 红线: 同一 (供应商, 日期, 零件) 只有一条有效记录,覆写由仓储负责
// ==========================================

use crate::domain::types::saturating_total;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 不良原因明细行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionItem {
    /// 不良原因 (例如 "Crack")
    pub cause: String,
    /// 不良数量
    pub qty: i64,
}

impl RejectionItem {
    pub fn new(cause: impl Into<String>, qty: i64) -> Self {
        Self {
            cause: cause.into(),
            qty,
        }
    }
}

// ==========================================
// DailyLog - 日报记录
// ==========================================
/// 日报记录
///
/// 数量字段为有符号整数: 引擎不做业务校验,负数原样参与计算以暴露脏数据。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    /// 记录ID
    pub log_id: String,

    /// 供应商ID
    pub supplier_id: String,

    /// 日期 (无时间分量)
    pub date: NaiveDate,

    /// 零件名称
    pub part_name: String,

    /// 实收数量
    pub received_qty: i64,

    /// 计划/投料数量 (交付率分母)
    pub target_qty: i64,

    /// 不良总数
    pub rejected_qty: i64,

    /// 不良原因明细 (合计应等于 rejected_qty,但不强制)
    #[serde(default)]
    pub rejection_breakdown: Vec<RejectionItem>,

    /// 旧版不良原因摘要 (逗号分隔)
    #[serde(default)]
    pub rejection_summary: Option<String>,

    /// 客诉次数
    pub complaints_count: i64,

    /// 客诉描述 (原样透传)
    #[serde(default)]
    pub complaint_detail: Option<String>,

    /// 备注
    #[serde(default)]
    pub remarks: Option<String>,
}

impl DailyLog {
    /// 创建新的日报记录 (自动生成 log_id)
    pub fn new(
        supplier_id: impl Into<String>,
        date: NaiveDate,
        part_name: impl Into<String>,
        received_qty: i64,
        target_qty: i64,
        rejected_qty: i64,
    ) -> Self {
        Self {
            log_id: format!("LOG-{}", Uuid::new_v4()),
            supplier_id: supplier_id.into(),
            date,
            part_name: part_name.into(),
            received_qty,
            target_qty,
            rejected_qty,
            rejection_breakdown: Vec::new(),
            rejection_summary: None,
            complaints_count: 0,
            complaint_detail: None,
            remarks: None,
        }
    }

    /// 设置不良原因明细
    pub fn with_breakdown(mut self, items: Vec<RejectionItem>) -> Self {
        self.rejection_breakdown = items;
        self
    }

    /// 设置旧版不良原因摘要
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.rejection_summary = Some(summary.into());
        self
    }

    /// 设置客诉信息
    pub fn with_complaints(mut self, count: i64, detail: Option<String>) -> Self {
        self.complaints_count = count;
        self.complaint_detail = detail;
        self
    }

    /// 明细合计
    pub fn breakdown_total(&self) -> i64 {
        saturating_total(self.rejection_breakdown.iter().map(|item| item.qty))
    }

    /// 明细合计与不良总数是否一致
    ///
    /// 仅供上游数据质量检查使用,引擎不据此修正数据
    pub fn is_breakdown_consistent(&self) -> bool {
        self.breakdown_total() == self.rejected_qty
    }

    /// 记录唯一键 (供应商, 日期, 零件)
    pub fn key(&self) -> (String, NaiveDate, String) {
        (self.supplier_id.clone(), self.date, self.part_name.clone())
    }
}
