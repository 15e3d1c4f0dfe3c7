// ==========================================
// 供应商质量管理门户 - 引擎层
// ==========================================
// 职责: 绩效汇总与排名的纯函数引擎
// 红线: 引擎不拼 SQL、不读全局状态,数据一律由调用方显式传入
// ==========================================

pub mod defect_breakdown;
pub mod log_filter;
pub mod monthly_aggregator;
pub mod period_summary;
pub mod ranking;

// 重导出核心引擎
pub use defect_breakdown::{DefectBreakdownReducer, LegacyCauseAttribution};
pub use log_filter::{DateRange, PartFilter, ALL_PARTS};
pub use monthly_aggregator::MonthlyAggregator;
pub use period_summary::summarize_period;
pub use ranking::RankingEngine;
