// ==========================================
// 供应商质量管理门户 - 排名参数
// ==========================================
// 职责: 排名窗口与质量分换算系数的持久化对象
// 存储: config_kv (scope_id='global'),每个字段一个键
// ==========================================

use crate::engine::ranking::{RankingEngine, DEFAULT_PPM_PER_QUALITY_POINT, DEFAULT_WINDOW_SIZE};
use serde::{Deserialize, Serialize};

/// 排名参数（持久化对象）
///
/// 存储位置：config_kv（scope_id='global'），每个字段一个键
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingParameters {
    /// 参与平均的最近月份数
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// 每扣 1 分质量分对应的 PPM
    #[serde(default = "default_ppm_per_quality_point")]
    pub ppm_per_quality_point: f64,
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

fn default_ppm_per_quality_point() -> f64 {
    DEFAULT_PPM_PER_QUALITY_POINT
}

impl Default for RankingParameters {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            ppm_per_quality_point: DEFAULT_PPM_PER_QUALITY_POINT,
        }
    }
}

impl RankingParameters {
    /// 构建对应参数的排名引擎
    pub fn engine(&self) -> RankingEngine {
        RankingEngine::with_parameters(self.window_size, self.ppm_per_quality_point)
    }
}
