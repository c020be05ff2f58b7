// ==========================================
// 皮带秤维保成本估算系统 - 估算结果对象
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 6. 结果对象
// 说明: 结果对象临时构造、同步返回,不落库;
//       每次请求从观测快照重新计算
// ==========================================

use crate::domain::observation::ObservationSummary;
use crate::domain::types::{ConfidenceLevel, MatchMethod, WeightCategory};
use serde::{Deserialize, Serialize};

// ==========================================
// Confidence - 置信对象
// ==========================================
// 说明: 启发式评分(0-100),不是统计置信区间
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confidence {
    /// 置信档位
    pub level: ConfidenceLevel,
    /// 评分(0-100,整数)
    pub score: u32,
    /// 前端颜色标签(green/yellow/orange/red)
    pub color: String,
}

impl Confidence {
    /// 由评分构造（档位与颜色由分数派生）
    pub fn from_score(score: f64) -> Self {
        let clamped = score.clamp(0.0, 100.0);
        let level = ConfidenceLevel::from_score(clamped);
        Self {
            level,
            score: clamped.round() as u32,
            color: level.color().to_string(),
        }
    }
}

// ==========================================
// WeighModuleEstimate - 称重模块估算结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeighModuleEstimate {
    /// 估算成本(分)
    pub estimated_cost: i64,
    /// 置信对象
    pub confidence: Confidence,
    /// 匹配方式
    pub method: MatchMethod,
    /// 参与估算的观测条数
    pub data_points: usize,
    /// 估算依据摘要(最多5条)
    pub matching_entries: Vec<ObservationSummary>,
    /// 日期范围描述(如"近6个月")
    pub date_range: String,
}

// ==========================================
// IdlerFrameEstimate - 托辊架估算结果
// ==========================================
// 总价 = 单价 × 需求数量
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlerFrameEstimate {
    /// 估算单价(分)
    pub estimated_cost_per_unit: i64,
    /// 估算总价(分)
    pub estimated_cost_total: i64,
    /// 需求数量
    pub quantity: i64,
    pub confidence: Confidence,
    pub method: MatchMethod,
    pub data_points: usize,
    pub matching_entries: Vec<ObservationSummary>,
    pub date_range: String,
}

// ==========================================
// BilletWeightEstimate - 砝码估算结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BilletWeightEstimate {
    /// 估算成本(分)
    pub estimated_cost: i64,
    /// 目标重量所属类别(轻型/重型)
    pub category: WeightCategory,
    pub confidence: Confidence,
    pub method: MatchMethod,
    pub data_points: usize,
    pub matching_entries: Vec<ObservationSummary>,
    pub date_range: String,
}

// ==========================================
// RollerEstimate - 托辊估算结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollerEstimate {
    /// 估算单价(分)
    pub estimated_cost_per_unit: i64,
    /// 估算总价(分)
    pub estimated_cost_total: i64,
    /// 需求数量
    pub quantity: i64,
    pub confidence: Confidence,
    pub method: MatchMethod,
    pub data_points: usize,
    pub matching_entries: Vec<ObservationSummary>,
    pub date_range: String,
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_from_score_derives_level_and_color() {
        let c = Confidence::from_score(92.4);
        assert_eq!(c.level, ConfidenceLevel::High);
        assert_eq!(c.score, 92);
        assert_eq!(c.color, "green");

        let c = Confidence::from_score(30.0);
        assert_eq!(c.level, ConfidenceLevel::VeryLow);
        assert_eq!(c.color, "red");
    }

    #[test]
    fn test_confidence_score_clamped() {
        // 评分越界时压回 [0,100]
        assert_eq!(Confidence::from_score(120.0).score, 100);
        assert_eq!(Confidence::from_score(-5.0).score, 0);
    }
}
