// ==========================================
// 供应商质量管理门户 - 数据源查询 Trait
// ==========================================
// 职责: 定义引擎上游所需的只读查询接口 (不包含实现)
// 红线: 每次调用返回独立快照,调用方不得依赖共享全局状态
// ==========================================

use crate::domain::daily_log::DailyLog;
use crate::domain::supplier::Supplier;
use crate::domain::types::SupplierCategory;
use crate::repository::error::RepositoryResult;
use chrono::NaiveDate;

// ==========================================
// DailyLogQuery Trait
// ==========================================
// 实现者: DailyLogRepository(rusqlite)
pub trait DailyLogQuery: Send + Sync {
    /// 查询供应商全部日报 (按日期、零件升序)
    fn list_by_supplier(&self, supplier_id: &str) -> RepositoryResult<Vec<DailyLog>>;

    /// 查询供应商日期区间内的日报 (闭区间,两端可缺省)
    fn list_by_supplier_in_range(
        &self,
        supplier_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RepositoryResult<Vec<DailyLog>>;
}

// ==========================================
// DailyLogWriter Trait
// ==========================================
// 同键 (supplier_id, date, part_name) 覆写,返回是否替换了旧记录
pub trait DailyLogWriter: Send + Sync {
    fn upsert(&self, log: &DailyLog) -> RepositoryResult<bool>;
}

// ==========================================
// SupplierQuery Trait
// ==========================================
// 实现者: SupplierRepository(rusqlite)
pub trait SupplierQuery: Send + Sync {
    /// 按ID查询
    fn find_by_id(&self, supplier_id: &str) -> RepositoryResult<Option<Supplier>>;

    /// 全部供应商 (按ID升序)
    fn list_all(&self) -> RepositoryResult<Vec<Supplier>>;

    /// 指定分类的供应商 (按ID升序)
    fn list_by_category(&self, category: SupplierCategory) -> RepositoryResult<Vec<Supplier>>;
}
