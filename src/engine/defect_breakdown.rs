// ==========================================
// 供应商质量管理门户 - 不良原因分布引擎
// ==========================================
// 职责: 合并日报中的不良原因明细,输出帕累托分析用的原因→数量分布
// 输入: 调用方已按月份/零件/日期筛选好的日报
// 输出: 按数量降序、原因名升序的 DefectCount 列表
// ==========================================
// 两条路径:
// 1. 结构化明细 (优先): 累加 qty > 0 的明细行
// 2. 旧版摘要 (兼容): 明细为空且不良数 > 0 时,按逗号拆分摘要文本
//    数量分配方式由 LegacyCauseAttribution 决定
// ==========================================

use crate::domain::daily_log::DailyLog;
use crate::domain::performance::{DefectCount, ParetoRow};
use crate::domain::types::saturating_total;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::instrument;

// ==========================================
// 旧版摘要数量分配方式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegacyCauseAttribution {
    /// 每个原因都记入整条日报的不良总数 (历史看板口径,会重复计数)
    #[default]
    FullQuantity,
    /// 不良总数在原因间均分,余数依次分给靠前的原因
    EvenSplit,
}

impl LegacyCauseAttribution {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "EVEN_SPLIT" => LegacyCauseAttribution::EvenSplit,
            _ => LegacyCauseAttribution::FullQuantity, // 默认值
        }
    }
}

impl fmt::Display for LegacyCauseAttribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegacyCauseAttribution::FullQuantity => write!(f, "FULL_QUANTITY"),
            LegacyCauseAttribution::EvenSplit => write!(f, "EVEN_SPLIT"),
        }
    }
}

/// 拆分旧版摘要: 按逗号切分、去首尾空白、跳过空项
pub fn split_legacy_summary(summary: &str) -> Vec<String> {
    summary
        .split(',')
        .map(str::trim)
        .filter(|cause| !cause.is_empty())
        .map(str::to_string)
        .collect()
}

// ==========================================
// DefectBreakdownReducer - 不良原因分布引擎
// ==========================================
pub struct DefectBreakdownReducer {
    legacy_attribution: LegacyCauseAttribution,
}

impl DefectBreakdownReducer {
    /// 使用默认 (历史口径) 分配方式
    pub fn new() -> Self {
        Self::with_attribution(LegacyCauseAttribution::default())
    }

    pub fn with_attribution(legacy_attribution: LegacyCauseAttribution) -> Self {
        Self { legacy_attribution }
    }

    pub fn legacy_attribution(&self) -> LegacyCauseAttribution {
        self.legacy_attribution
    }

    /// 生成不良原因分布
    ///
    /// 明细合计与不良总数不一致时按明细原样使用,不做修正
    #[instrument(skip(self, logs), fields(count = logs.len()))]
    pub fn reduce(&self, logs: &[DailyLog]) -> Vec<DefectCount> {
        let mut histogram: HashMap<String, i64> = HashMap::new();
        let mut legacy_logs = 0usize;

        for log in logs {
            if !log.rejection_breakdown.is_empty() {
                for item in log.rejection_breakdown.iter().filter(|item| item.qty > 0) {
                    let slot = histogram.entry(item.cause.clone()).or_insert(0);
                    *slot = slot.saturating_add(item.qty);
                }
                continue;
            }

            if log.rejected_qty <= 0 {
                continue;
            }

            let causes = log
                .rejection_summary
                .as_deref()
                .map(split_legacy_summary)
                .unwrap_or_default();
            if causes.is_empty() {
                continue;
            }

            legacy_logs += 1;
            for (cause, qty) in self.attribute_legacy(causes, log.rejected_qty) {
                let slot = histogram.entry(cause).or_insert(0);
                *slot = slot.saturating_add(qty);
            }
        }

        if legacy_logs > 0 {
            tracing::debug!(
                legacy_logs,
                attribution = %self.legacy_attribution,
                "部分日报无结构化明细,使用旧版摘要拆分"
            );
        }

        let mut counts: Vec<DefectCount> = histogram
            .into_iter()
            .map(|(cause, quantity)| DefectCount { cause, quantity })
            .collect();
        counts.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.cause.cmp(&b.cause)));
        counts
    }

    /// 按策略分配旧版摘要的数量
    fn attribute_legacy(&self, causes: Vec<String>, rejected_qty: i64) -> Vec<(String, i64)> {
        match self.legacy_attribution {
            LegacyCauseAttribution::FullQuantity => causes
                .into_iter()
                .map(|cause| (cause, rejected_qty))
                .collect(),
            LegacyCauseAttribution::EvenSplit => {
                let n = causes.len() as i64;
                let base = rejected_qty / n;
                let remainder = rejected_qty % n;
                causes
                    .into_iter()
                    .enumerate()
                    .map(|(idx, cause)| {
                        let extra = if (idx as i64) < remainder { 1 } else { 0 };
                        (cause, base + extra)
                    })
                    .filter(|(_, qty)| *qty > 0)
                    .collect()
            }
        }
    }

    /// 帕累托分析: 在已排序的分布上计算占比与累计占比 (两位小数)
    ///
    /// 合计 <= 0 时占比均为 0
    pub fn pareto(counts: &[DefectCount]) -> Vec<ParetoRow> {
        let total = saturating_total(counts.iter().map(|c| c.quantity));
        let mut running = 0i64;

        counts
            .iter()
            .map(|c| {
                running = running.saturating_add(c.quantity);
                let (share_pct, cumulative_pct) = if total > 0 {
                    (
                        round2(c.quantity as f64 / total as f64 * 100.0),
                        round2(running as f64 / total as f64 * 100.0),
                    )
                } else {
                    (0.0, 0.0)
                };
                ParetoRow {
                    cause: c.cause.clone(),
                    quantity: c.quantity,
                    share_pct,
                    cumulative_pct,
                }
            })
            .collect()
    }
}

impl Default for DefectBreakdownReducer {
    fn default() -> Self {
        Self::new()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
