// ==========================================
// 供应商质量管理门户 - 绩效 API
// ==========================================
// 职责: 组合数据源、配置与引擎,提供看板/不良分析/排名等查询
// 架构: API 层 → (Query Trait + KpiConfigReader) → Engine 层
// 红线: 每次查询从数据源重新读取快照并重算,不缓存派生数据
// ==========================================

use std::collections::HashMap;
use std::sync::Arc;

use tracing::instrument;

use crate::api::dto::{
    CategoryOverview, CategoryOverviewResponse, CategoryRankingResponse, DefectAnalysisResponse,
    MonthlyKpiRow, PeriodSummaryResponse, RecordLogResponse, SupplierDashboardResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::config::KpiConfigReader;
use crate::domain::daily_log::DailyLog;
use crate::domain::performance::MonthlyAggregate;
use crate::domain::supplier::Supplier;
use crate::domain::types::{saturating_total, SupplierCategory};
use crate::engine::defect_breakdown::DefectBreakdownReducer;
use crate::engine::log_filter::{filter_by_part, unique_parts, DateRange, PartFilter};
use crate::engine::monthly_aggregator::MonthlyAggregator;
use crate::engine::period_summary::summarize_period;
use crate::repository::{DailyLogQuery, DailyLogWriter, SupplierQuery};

// ==========================================
// PerformanceApi - 绩效 API
// ==========================================
pub struct PerformanceApi {
    logs: Arc<dyn DailyLogQuery>,
    log_writer: Arc<dyn DailyLogWriter>,
    suppliers: Arc<dyn SupplierQuery>,
    config: Arc<dyn KpiConfigReader>,
    aggregator: MonthlyAggregator,
}

impl PerformanceApi {
    /// 创建新的 PerformanceApi 实例
    ///
    /// # 参数
    /// - logs: 日报查询
    /// - log_writer: 日报写入
    /// - suppliers: 供应商查询
    /// - config: KPI 配置读取
    pub fn new(
        logs: Arc<dyn DailyLogQuery>,
        log_writer: Arc<dyn DailyLogWriter>,
        suppliers: Arc<dyn SupplierQuery>,
        config: Arc<dyn KpiConfigReader>,
    ) -> Self {
        Self {
            logs,
            log_writer,
            suppliers,
            config,
            aggregator: MonthlyAggregator::new(),
        }
    }

    fn require_supplier(&self, supplier_id: &str) -> ApiResult<Supplier> {
        if supplier_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("供应商ID不能为空".to_string()));
        }
        self.suppliers
            .find_by_id(supplier_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Supplier(id={})不存在", supplier_id)))
    }

    async fn defect_reducer(&self) -> ApiResult<DefectBreakdownReducer> {
        let attribution = self.config.get_legacy_attribution().await?;
        Ok(DefectBreakdownReducer::with_attribution(attribution))
    }

    // ==========================================
    // 供应商看板
    // ==========================================

    /// 查询供应商看板
    ///
    /// # 参数
    /// - supplier_id: 供应商ID
    /// - part: 零件名, None 或 "ALL" 表示全部零件
    ///
    /// # 返回
    /// 月度 KPI (最近月份在前)、不良原因分布、零件清单
    #[instrument(skip(self))]
    pub async fn get_supplier_dashboard(
        &self,
        supplier_id: &str,
        part: Option<&str>,
    ) -> ApiResult<SupplierDashboardResponse> {
        let supplier = self.require_supplier(supplier_id)?;
        let filter = PartFilter::from_option(part);

        let logs = self.logs.list_by_supplier(supplier_id)?;
        let parts = unique_parts(&logs);

        let target_ppm = match supplier.category {
            Some(category) => Some(self.config.get_ppm_target(category).await?),
            None => None,
        };

        let monthly_rows = MonthlyAggregator::most_recent_first(self.aggregator.aggregate(&logs, &filter));
        let monthly: Vec<MonthlyKpiRow> = monthly_rows
            .iter()
            .map(|row| MonthlyKpiRow::from_aggregate(row, target_ppm))
            .collect();

        let scoped = filter_by_part(&logs, &filter);
        let defects = self.defect_reducer().await?.reduce(&scoped);

        tracing::info!(
            supplier_id,
            months = monthly.len(),
            causes = defects.len(),
            "供应商看板查询完成"
        );

        Ok(SupplierDashboardResponse {
            supplier_id: supplier.supplier_id,
            part_scope: filter.scope_label().to_string(),
            monthly,
            defects,
            parts,
            as_of: chrono::Local::now().to_rfc3339(),
        })
    }

    // ==========================================
    // 不良分析
    // ==========================================

    /// 不良原因帕累托分析
    #[instrument(skip(self))]
    pub async fn get_defect_analysis(
        &self,
        supplier_id: &str,
        part: Option<&str>,
        range: DateRange,
    ) -> ApiResult<DefectAnalysisResponse> {
        let supplier = self.require_supplier(supplier_id)?;
        let filter = PartFilter::from_option(part);

        let logs = self
            .logs
            .list_by_supplier_in_range(supplier_id, range.start, range.end)?;
        let scoped = filter_by_part(&logs, &filter);

        let counts = self.defect_reducer().await?.reduce(&scoped);
        let total_quantity = saturating_total(counts.iter().map(|c| c.quantity));

        Ok(DefectAnalysisResponse {
            supplier_id: supplier.supplier_id,
            part_scope: filter.scope_label().to_string(),
            total_quantity,
            pareto: DefectBreakdownReducer::pareto(&counts),
        })
    }

    // ==========================================
    // 区间汇总
    // ==========================================

    /// 日报视图: 区间合计与逐日明细
    #[instrument(skip(self))]
    pub async fn get_period_summary(
        &self,
        supplier_id: &str,
        range: DateRange,
    ) -> ApiResult<PeriodSummaryResponse> {
        let supplier = self.require_supplier(supplier_id)?;
        let logs = self
            .logs
            .list_by_supplier_in_range(supplier_id, range.start, range.end)?;

        Ok(PeriodSummaryResponse {
            supplier_id: supplier.supplier_id,
            summary: summarize_period(&logs, &range),
        })
    }

    // ==========================================
    // 分类排名
    // ==========================================

    /// 查询分类排名 (按配置的窗口与质量分刻度)
    #[instrument(skip(self))]
    pub async fn get_category_rankings(
        &self,
        category: SupplierCategory,
    ) -> ApiResult<CategoryRankingResponse> {
        let parameters = self.config.get_ranking_parameters().await?;
        let engine = parameters.engine();

        let suppliers = self.suppliers.list_by_category(category)?;

        let mut monthly_by_supplier: HashMap<String, Vec<MonthlyAggregate>> = HashMap::new();
        for supplier in &suppliers {
            let logs = self.logs.list_by_supplier(&supplier.supplier_id)?;
            let monthly = self.aggregator.aggregate(&logs, &PartFilter::All);
            monthly_by_supplier.insert(supplier.supplier_id.clone(), monthly);
        }

        let rankings = engine.rank(category, &suppliers, &monthly_by_supplier);

        tracing::info!(
            %category,
            ranked = rankings.len(),
            window_size = engine.window_size(),
            "分类排名计算完成"
        );

        Ok(CategoryRankingResponse {
            category,
            window_size: engine.window_size(),
            ppm_per_quality_point: engine.ppm_per_quality_point(),
            rankings,
        })
    }

    /// 分类概览: 每个分类的供应商数与 PPM 目标
    #[instrument(skip(self))]
    pub async fn get_category_overview(&self) -> ApiResult<CategoryOverviewResponse> {
        let suppliers = self.suppliers.list_all()?;

        let mut categories = Vec::with_capacity(SupplierCategory::ALL.len());
        for category in SupplierCategory::ALL {
            categories.push(CategoryOverview {
                category,
                supplier_count: suppliers.iter().filter(|s| s.belongs_to(category)).count(),
                target_ppm: self.config.get_ppm_target(category).await?,
            });
        }
        let unassigned_count = suppliers.iter().filter(|s| s.category.is_none()).count();

        Ok(CategoryOverviewResponse {
            categories,
            unassigned_count,
        })
    }

    // ==========================================
    // 日报写入
    // ==========================================

    /// 写入日报 (同一供应商、日期、零件只保留最新一条)
    #[instrument(skip(self, log), fields(supplier_id = %log.supplier_id, date = %log.date))]
    pub async fn record_daily_log(&self, log: DailyLog) -> ApiResult<RecordLogResponse> {
        if log.supplier_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("供应商ID不能为空".to_string()));
        }
        if log.part_name.trim().is_empty() {
            return Err(ApiError::InvalidInput("零件名不能为空".to_string()));
        }
        if !log.is_breakdown_consistent() {
            tracing::warn!(
                rejected_qty = log.rejected_qty,
                breakdown_total = log.breakdown_total(),
                "不良明细合计与不良总数不一致,按原样保存"
            );
        }

        let replaced = self.log_writer.upsert(&log)?;
        Ok(RecordLogResponse {
            log_id: log.log_id,
            replaced,
        })
    }
}
