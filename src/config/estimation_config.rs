// ==========================================
// 皮带秤维保成本估算系统 - 估算参数配置
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 7. 配置项全集
// ==========================================
// 说明: 衰减常数与评分权重是经验取值,无推导文档,
//       保留为可配置项,等待按实际采购结果校准
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// EstimationConfig - 估算参数全集
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationConfig {
    // ===== 时效衰减 =====
    /// 指数衰减常数(月)。8.66 使权重在6个月≈0.5、12个月≈0.25
    pub recency_decay_months: f64,

    // ===== 置信评分 =====
    /// 精确匹配基础分
    pub base_score_exact: f64,
    /// 插值匹配基础分
    pub base_score_interpolated: f64,
    /// 模糊匹配基础分
    pub base_score_fuzzy: f64,
    /// 外推基础分(当前流程不产生,保留档位)
    pub base_score_extrapolated: f64,
    /// 未知方式兜底分
    pub base_score_default: f64,
    /// 每条观测加分
    pub count_score_per_point: f64,
    /// 观测条数加分上限
    pub count_score_cap: f64,
    /// 平均时效权重的评分系数
    pub recency_score_weight: f64,

    // ===== 连续属性容差 =====
    /// 长度类属性容差mm(带宽/辊面长/辊径)
    pub length_tolerance_mm: f64,
    /// 输送能力容差(kg/m)
    pub capacity_tolerance: f64,
    /// 重量容差kg(砝码)
    pub weight_tolerance_kg: f64,

    // ===== 匹配行为 =====
    /// 模糊匹配选取的最近观测条数
    pub fuzzy_nearest_n: usize,
    /// 砝码轻/重类别边界kg(成本模型在此不连续)
    pub billet_weight_boundary_kg: f64,
    /// 结果摘要最多携带的观测条数
    pub matching_summary_limit: usize,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            recency_decay_months: 8.66,
            base_score_exact: 50.0,
            base_score_interpolated: 40.0,
            base_score_fuzzy: 30.0,
            base_score_extrapolated: 15.0,
            base_score_default: 10.0,
            count_score_per_point: 6.0,
            count_score_cap: 30.0,
            recency_score_weight: 20.0,
            length_tolerance_mm: 10.0,
            capacity_tolerance: 1.0,
            weight_tolerance_kg: 1.0,
            fuzzy_nearest_n: 3,
            billet_weight_boundary_kg: 250.0,
            matching_summary_limit: 5,
        }
    }
}

// ==========================================
// 配置键 (config_kv 表, scope_id='global')
// ==========================================
pub mod config_keys {
    pub const RECENCY_DECAY_MONTHS: &str = "estimation/recency_decay_months";
    pub const BASE_SCORE_EXACT: &str = "estimation/base_score_exact";
    pub const BASE_SCORE_INTERPOLATED: &str = "estimation/base_score_interpolated";
    pub const BASE_SCORE_FUZZY: &str = "estimation/base_score_fuzzy";
    pub const BASE_SCORE_EXTRAPOLATED: &str = "estimation/base_score_extrapolated";
    pub const COUNT_SCORE_PER_POINT: &str = "estimation/count_score_per_point";
    pub const COUNT_SCORE_CAP: &str = "estimation/count_score_cap";
    pub const RECENCY_SCORE_WEIGHT: &str = "estimation/recency_score_weight";
    pub const LENGTH_TOLERANCE_MM: &str = "estimation/length_tolerance_mm";
    pub const CAPACITY_TOLERANCE: &str = "estimation/capacity_tolerance";
    pub const WEIGHT_TOLERANCE_KG: &str = "estimation/weight_tolerance_kg";
    pub const FUZZY_NEAREST_N: &str = "estimation/fuzzy_nearest_n";
    pub const BILLET_WEIGHT_BOUNDARY_KG: &str = "estimation/billet_weight_boundary_kg";
    pub const MATCHING_SUMMARY_LIMIT: &str = "estimation/matching_summary_limit";
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let cfg = EstimationConfig::default();
        // 经验常数按原值保留
        assert!((cfg.recency_decay_months - 8.66).abs() < 1e-9);
        assert_eq!(cfg.base_score_exact, 50.0);
        assert_eq!(cfg.base_score_interpolated, 40.0);
        assert_eq!(cfg.base_score_fuzzy, 30.0);
        assert_eq!(cfg.base_score_extrapolated, 15.0);
        assert_eq!(cfg.count_score_cap, 30.0);
        assert_eq!(cfg.fuzzy_nearest_n, 3);
        assert_eq!(cfg.billet_weight_boundary_kg, 250.0);
    }

    #[test]
    fn test_decay_constant_half_life_shape() {
        // 8.66 的由来: 6个月权重≈0.5, 12个月≈0.25
        let cfg = EstimationConfig::default();
        let w6 = (-6.0 / cfg.recency_decay_months).exp();
        let w12 = (-12.0 / cfg.recency_decay_months).exp();
        assert!((w6 - 0.5).abs() < 0.01, "6个月权重应约为0.5, 实际{}", w6);
        assert!((w12 - 0.25).abs() < 0.01, "12个月权重应约为0.25, 实际{}", w12);
    }
}
