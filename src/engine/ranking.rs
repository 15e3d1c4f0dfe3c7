// ==========================================
// 供应商质量管理门户 - 供应商排名引擎
// ==========================================
// 职责: 同一分类内按近 N 个月综合得分对供应商排序
// 输入: 分类 + 供应商列表 + 各供应商月度汇总 (时间升序)
// 输出: RankedSupplier 列表 (名次 1..N)
// ==========================================
// 评分公式 (固定,不随调用方变化):
// - 质量分 = clamp(100 - ppm / ppm_per_quality_point, 0, 100)
//   默认每 1000 ppm 扣 1 分,即不良率 1% 扣 10 分
// - 交付分 = clamp(delivery_pct, 0, 100)
// - 月综合分 = (质量分 + 交付分) / 2
// - 平均分 = 窗口内月综合分的算术平均; 无历史记 0
// 排序: 平均分降序,同分按 supplier_id 升序
// ==========================================

use crate::domain::performance::{MonthlyAggregate, RankedSupplier};
use crate::domain::supplier::Supplier;
use crate::domain::types::SupplierCategory;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::instrument;

/// 默认评分窗口 (月)
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// 默认质量分刻度: 每扣 1 分对应的 ppm
pub const DEFAULT_PPM_PER_QUALITY_POINT: f64 = 1_000.0;

/// 单项得分上限
pub const MAX_COMPONENT_SCORE: f64 = 100.0;

// ==========================================
// RankingEngine - 排名引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct RankingEngine {
    window_size: usize,
    ppm_per_quality_point: f64,
}

impl RankingEngine {
    /// 使用默认参数 (窗口 3 个月, 1000 ppm/分)
    pub fn new() -> Self {
        Self::with_parameters(DEFAULT_WINDOW_SIZE, DEFAULT_PPM_PER_QUALITY_POINT)
    }

    /// 自定义参数
    ///
    /// `ppm_per_quality_point` 非正数或非有限值时回退为默认刻度
    pub fn with_parameters(window_size: usize, ppm_per_quality_point: f64) -> Self {
        let ppm_per_quality_point = if ppm_per_quality_point.is_finite() && ppm_per_quality_point > 0.0 {
            ppm_per_quality_point
        } else {
            DEFAULT_PPM_PER_QUALITY_POINT
        };
        Self {
            window_size,
            ppm_per_quality_point,
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn ppm_per_quality_point(&self) -> f64 {
        self.ppm_per_quality_point
    }

    // ==========================================
    // 评分
    // ==========================================

    /// 质量分: 随 ppm 单调不增
    pub fn quality_component(&self, ppm: i64) -> f64 {
        (MAX_COMPONENT_SCORE - ppm as f64 / self.ppm_per_quality_point)
            .clamp(0.0, MAX_COMPONENT_SCORE)
    }

    /// 交付分: 随交付率单调不减,超交不额外加分
    pub fn delivery_component(&self, delivery_pct: i64) -> f64 {
        (delivery_pct as f64).clamp(0.0, MAX_COMPONENT_SCORE)
    }

    /// 单月综合分
    pub fn composite_score(&self, row: &MonthlyAggregate) -> f64 {
        (self.quality_component(row.ppm) + self.delivery_component(row.delivery_pct)) / 2.0
    }

    /// 窗口平均分
    ///
    /// # 参数
    /// - `history`: 时间升序的月度汇总
    ///
    /// # 返回
    /// (平均分, 参与月份数); 无历史时为 (0.0, 0)
    pub fn window_score(&self, history: &[MonthlyAggregate]) -> (f64, usize) {
        let start = history.len().saturating_sub(self.window_size);
        let window = &history[start..];
        if window.is_empty() {
            return (0.0, 0);
        }
        let total: f64 = window.iter().map(|row| self.composite_score(row)).sum();
        (total / window.len() as f64, window.len())
    }

    // ==========================================
    // 排名
    // ==========================================

    /// 生成分类内排名
    ///
    /// # 参数
    /// - `category`: 排名池
    /// - `suppliers`: 候选供应商; 分类缺失或不同的会被排除
    /// - `monthly_by_supplier`: supplier_id → 月度汇总 (时间升序); 缺失视为无历史
    ///
    /// # 返回
    /// 按平均分降序、supplier_id 升序排列,名次 1..N
    #[instrument(skip(self, suppliers, monthly_by_supplier), fields(candidates = suppliers.len()))]
    pub fn rank(
        &self,
        category: SupplierCategory,
        suppliers: &[Supplier],
        monthly_by_supplier: &HashMap<String, Vec<MonthlyAggregate>>,
    ) -> Vec<RankedSupplier> {
        let mut excluded = 0usize;
        let mut ranked: Vec<RankedSupplier> = suppliers
            .iter()
            .filter(|supplier| {
                let keep = supplier.belongs_to(category);
                if !keep {
                    excluded += 1;
                }
                keep
            })
            .map(|supplier| {
                let history = monthly_by_supplier
                    .get(&supplier.supplier_id)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                let (average_score, months_counted) = self.window_score(history);
                RankedSupplier {
                    supplier_id: supplier.supplier_id.clone(),
                    display_name: supplier.display_name.clone(),
                    average_score,
                    months_counted,
                    rank: 0,
                }
            })
            .collect();

        if excluded > 0 {
            tracing::debug!(excluded, "供应商分类不匹配,不参与本分类排名");
        }

        ranked.sort_by(|a, b| {
            b.average_score
                .partial_cmp(&a.average_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.supplier_id.cmp(&b.supplier_id))
        });

        for (idx, entry) in ranked.iter_mut().enumerate() {
            entry.rank = idx + 1;
        }

        ranked
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::MonthKey;

    fn month(m: u32, ppm: i64, delivery_pct: i64) -> MonthlyAggregate {
        MonthlyAggregate {
            month: MonthKey::new(2025, m),
            total_received: 0,
            total_target: 0,
            total_rejected: 0,
            total_complaints: 0,
            ppm,
            delivery_pct,
        }
    }

    fn child_part(id: &str) -> Supplier {
        Supplier::new(id, format!("{} Ltd", id), Some(SupplierCategory::ChildPart))
    }

    #[test]
    fn test_quality_component_scale() {
        let engine = RankingEngine::new();
        assert_eq!(engine.quality_component(0), 100.0);
        assert_eq!(engine.quality_component(10_000), 90.0);
        assert_eq!(engine.quality_component(66_667), 100.0 - 66.667);
        assert_eq!(engine.quality_component(500_000), 0.0);
        // 负 ppm 来自脏数据,不超过上限
        assert_eq!(engine.quality_component(-5_000), 100.0);
    }

    #[test]
    fn test_components_monotonic() {
        let engine = RankingEngine::new();
        let mut prev_q = f64::INFINITY;
        let mut prev_d = f64::NEG_INFINITY;
        for step in 0..=300 {
            let q = engine.quality_component(step * 500);
            let d = engine.delivery_component(step - 50);
            assert!(q <= prev_q);
            assert!(d >= prev_d);
            prev_q = q;
            prev_d = d;
        }
        assert_eq!(engine.delivery_component(120), 100.0);
    }

    #[test]
    fn test_window_uses_last_n_months() {
        let engine = RankingEngine::new();
        let history = vec![
            month(1, 0, 0),   // 50, 窗口外
            month(2, 0, 80),  // 90
            month(3, 0, 84),  // 92
            month(4, 0, 76),  // 88
        ];

        let (score, counted) = engine.window_score(&history);

        assert_eq!(counted, 3);
        assert!((score - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_history_uses_available_months() {
        let engine = RankingEngine::new();
        let (score, counted) = engine.window_score(&[month(1, 0, 100)]);
        assert_eq!(counted, 1);
        assert_eq!(score, 100.0);
        assert_eq!(engine.window_score(&[]), (0.0, 0));
    }

    #[test]
    fn test_child_part_scenario() {
        let engine = RankingEngine::new();
        let suppliers = vec![child_part("B"), child_part("A")];
        let mut monthly = HashMap::new();
        // A: [90, 92, 88] → 90
        monthly.insert("A".to_string(), vec![month(1, 0, 80), month(2, 0, 84), month(3, 0, 76)]);
        // B: [95, 40, 85] → 73.3
        monthly.insert("B".to_string(), vec![month(1, 0, 90), month(2, 60_000, 40), month(3, 0, 70)]);

        let ranked = engine.rank(SupplierCategory::ChildPart, &suppliers, &monthly);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].supplier_id, "A");
        assert_eq!(ranked[0].rank, 1);
        assert!((ranked[0].average_score - 90.0).abs() < 1e-9);
        assert_eq!(ranked[1].supplier_id, "B");
        assert_eq!(ranked[1].rank, 2);
        assert!((ranked[1].average_score - 220.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_history_ranks_last() {
        let engine = RankingEngine::new();
        let suppliers = vec![child_part("AAA"), child_part("ZZZ")];
        let mut monthly = HashMap::new();
        monthly.insert("ZZZ".to_string(), vec![month(1, 400_000, 10)]); // 综合 5

        let ranked = engine.rank(SupplierCategory::ChildPart, &suppliers, &monthly);

        assert_eq!(ranked[0].supplier_id, "ZZZ");
        assert_eq!(ranked[1].supplier_id, "AAA");
        assert_eq!(ranked[1].average_score, 0.0);
        assert_eq!(ranked[1].months_counted, 0);
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn test_ties_broken_by_supplier_id() {
        let engine = RankingEngine::new();
        let suppliers = vec![child_part("SUP003"), child_part("SUP001"), child_part("SUP002")];
        let monthly: HashMap<String, Vec<MonthlyAggregate>> = suppliers
            .iter()
            .map(|s| (s.supplier_id.clone(), vec![month(1, 0, 100)]))
            .collect();

        let ranked = engine.rank(SupplierCategory::ChildPart, &suppliers, &monthly);

        let ids: Vec<&str> = ranked.iter().map(|r| r.supplier_id.as_str()).collect();
        assert_eq!(ids, vec!["SUP001", "SUP002", "SUP003"]);
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_other_or_missing_category_excluded() {
        let engine = RankingEngine::new();
        let suppliers = vec![
            child_part("SUP001"),
            Supplier::new("SUP002", "Casting Co", Some(SupplierCategory::PreMachining)),
            Supplier::new("SUP003", "Unknown Co", None),
        ];

        let ranked = engine.rank(SupplierCategory::ChildPart, &suppliers, &HashMap::new());

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].supplier_id, "SUP001");
    }

    #[test]
    fn test_rank_is_pure() {
        let engine = RankingEngine::with_parameters(2, 500.0);
        let suppliers = vec![child_part("A"), child_part("B"), child_part("C")];
        let mut monthly = HashMap::new();
        monthly.insert("A".to_string(), vec![month(1, 1_000, 95), month(2, 3_000, 99)]);
        monthly.insert("C".to_string(), vec![month(1, 0, 100)]);

        let first = engine.rank(SupplierCategory::ChildPart, &suppliers, &monthly);
        let second = engine.rank(SupplierCategory::ChildPart, &suppliers, &monthly);

        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_window_scores_everyone_zero() {
        let engine = RankingEngine::with_parameters(0, DEFAULT_PPM_PER_QUALITY_POINT);
        let (score, counted) = engine.window_score(&[month(1, 0, 100)]);
        assert_eq!((score, counted), (0.0, 0));
    }

    #[test]
    fn test_invalid_scale_falls_back_to_default() {
        let engine = RankingEngine::with_parameters(3, 0.0);
        assert_eq!(engine.ppm_per_quality_point(), DEFAULT_PPM_PER_QUALITY_POINT);
        let engine = RankingEngine::with_parameters(3, f64::NAN);
        assert_eq!(engine.ppm_per_quality_point(), DEFAULT_PPM_PER_QUALITY_POINT);
    }
}
