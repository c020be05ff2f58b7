// ==========================================
// 皮带秤维保成本估算系统 - 置信评分器
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 5. 置信评分
// ==========================================
// 公式: score = base(匹配方式) + min(上限, 条数×每条加分) + 平均时效权重×系数
// 基础分: exact=50, interpolated=40, fuzzy=30, extrapolated=15
// 说明: 启发式评分规则,不是统计置信区间;
//       权重为经验取值,保留为配置项等待校准
// ==========================================

use crate::config::EstimationConfig;
use crate::domain::estimate::Confidence;
use crate::domain::types::MatchMethod;

// ==========================================
// ConfidenceScorer - 置信评分器
// ==========================================
pub struct ConfidenceScorer {
    config: EstimationConfig,
}

impl ConfidenceScorer {
    /// 创建置信评分器
    pub fn new(config: &EstimationConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// 匹配方式对应的基础分
    fn base_score(&self, method: MatchMethod) -> f64 {
        match method {
            MatchMethod::Exact => self.config.base_score_exact,
            MatchMethod::Interpolated => self.config.base_score_interpolated,
            MatchMethod::Fuzzy => self.config.base_score_fuzzy,
            MatchMethod::Extrapolated => self.config.base_score_extrapolated,
        }
    }

    /// 计算置信对象
    ///
    /// # 参数
    /// - method: 匹配方式
    /// - data_points: 参与估算的观测条数
    /// - avg_recency_weight: 参与观测的平均时效权重 (0..=1)
    ///
    /// 结果对 (method, data_points, avg_recency_weight) 确定性
    pub fn score(
        &self,
        method: MatchMethod,
        data_points: usize,
        avg_recency_weight: f64,
    ) -> Confidence {
        let count_score = (data_points as f64 * self.config.count_score_per_point)
            .min(self.config.count_score_cap);
        let recency_score = avg_recency_weight.clamp(0.0, 1.0) * self.config.recency_score_weight;

        Confidence::from_score(self.base_score(method) + count_score + recency_score)
    }
}
