// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use supplier_quality_portal::config::{ConfigResult, KpiConfigReader};
use supplier_quality_portal::{LegacyCauseAttribution, SupplierCategory};

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockKpiConfig {
    pub pre_machining_target: i64,
    pub child_part_target: i64,
    pub ranking_window: usize,
    pub ppm_per_quality_point: f64,
    pub legacy_attribution: LegacyCauseAttribution,
}

impl Default for MockKpiConfig {
    fn default() -> Self {
        Self {
            pre_machining_target: 2000,
            child_part_target: 0,
            ranking_window: 3,
            ppm_per_quality_point: 1000.0,
            legacy_attribution: LegacyCauseAttribution::FullQuantity,
        }
    }
}

impl MockKpiConfig {
    /// 自定义排名窗口
    pub fn with_window(window: usize) -> Self {
        Self {
            ranking_window: window,
            ..Self::default()
        }
    }

    /// 旧版摘要均分口径
    pub fn even_split() -> Self {
        Self {
            legacy_attribution: LegacyCauseAttribution::EvenSplit,
            ..Self::default()
        }
    }
}

#[async_trait]
impl KpiConfigReader for MockKpiConfig {
    async fn get_ppm_target(&self, category: SupplierCategory) -> ConfigResult<i64> {
        Ok(match category {
            SupplierCategory::PreMachining => self.pre_machining_target,
            SupplierCategory::ChildPart => self.child_part_target,
        })
    }

    async fn get_ranking_window(&self) -> ConfigResult<usize> {
        Ok(self.ranking_window)
    }

    async fn get_ppm_per_quality_point(&self) -> ConfigResult<f64> {
        Ok(self.ppm_per_quality_point)
    }

    async fn get_legacy_attribution(&self) -> ConfigResult<LegacyCauseAttribution> {
        Ok(self.legacy_attribution)
    }
}
