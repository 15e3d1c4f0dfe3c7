// ==========================================
// 供应商质量管理门户 - KPI 配置读取 Trait
// ==========================================
// 职责: 定义绩效接口所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::error::ConfigResult;
use crate::config::ranking_profile::RankingParameters;
use crate::domain::types::SupplierCategory;
use crate::engine::defect_breakdown::LegacyCauseAttribution;
use async_trait::async_trait;

// ==========================================
// KpiConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait KpiConfigReader: Send + Sync {
    /// 获取分类的月度 PPM 目标
    ///
    /// # 默认值
    /// - Pre-Machining: 2000
    /// - Child-Part: 0
    async fn get_ppm_target(&self, category: SupplierCategory) -> ConfigResult<i64>;

    /// 获取排名窗口月份数
    ///
    /// # 默认值
    /// - 3
    async fn get_ranking_window(&self) -> ConfigResult<usize>;

    /// 获取质量分刻度（每扣 1 分对应的 PPM）
    ///
    /// # 默认值
    /// - 1000.0
    async fn get_ppm_per_quality_point(&self) -> ConfigResult<f64>;

    /// 获取旧版不良摘要的数量分配方式
    ///
    /// # 默认值
    /// - FULL_QUANTITY
    async fn get_legacy_attribution(&self) -> ConfigResult<LegacyCauseAttribution>;

    /// 排名参数合集
    async fn get_ranking_parameters(&self) -> ConfigResult<RankingParameters> {
        Ok(RankingParameters {
            window_size: self.get_ranking_window().await?,
            ppm_per_quality_point: self.get_ppm_per_quality_point().await?,
        })
    }
}
