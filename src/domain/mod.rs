// ==========================================
// 供应商质量管理门户 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型与派生数据结构
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod daily_log;
pub mod performance;
pub mod supplier;
pub mod types;

// 重导出核心类型
pub use daily_log::{DailyLog, RejectionItem};
pub use performance::{
    DailyRow, DefectCount, MonthlyAggregate, ParetoRow, PeriodSummary, RankedSupplier,
};
pub use supplier::Supplier;
pub use types::{saturating_total, MonthKey, PpmStatus, SupplierCategory, SupplierStatus};
