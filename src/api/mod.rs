// ==========================================
// 供应商质量管理门户 - API 层
// ==========================================
// 职责: 提供绩效查询与日报写入接口,供展示层调用
// ==========================================

pub mod dto;
pub mod error;
pub mod performance_api;

// 重导出核心类型
pub use dto::{
    CategoryOverview, CategoryOverviewResponse, CategoryRankingResponse, DefectAnalysisResponse,
    MonthlyKpiRow, PeriodSummaryResponse, RecordLogResponse, SupplierDashboardResponse,
};
pub use error::{ApiError, ApiResult};
pub use performance_api::PerformanceApi;
