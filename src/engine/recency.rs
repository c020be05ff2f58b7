// ==========================================
// 皮带秤维保成本估算系统 - 时效加权器
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 4.5 时效衰减
// ==========================================
// 权重公式: weight = exp(-Δ月 / 8.66)
// 取值由来: 6个月权重≈0.5, 12个月≈0.25(半衰期式经验取值)
// 用途: 精确匹配档/模糊匹配档的加权平均 Σ(cost·w)/Σ(w)
// ==========================================

use crate::engine::record::CostRecord;
use chrono::NaiveDate;

/// 月均天数（加权时把天数差折算成月）
const AVG_DAYS_PER_MONTH: f64 = 30.44;

// ==========================================
// RecencyWeighter - 时效加权器
// ==========================================
pub struct RecencyWeighter {
    decay_months: f64,
}

impl RecencyWeighter {
    /// 创建时效加权器
    ///
    /// # 参数
    /// - decay_months: 指数衰减常数(月),来自 EstimationConfig
    pub fn new(decay_months: f64) -> Self {
        Self { decay_months }
    }

    /// 观测年龄(月,非负;晚于today的观测按0月处理)
    pub fn age_in_months(&self, effective_date: NaiveDate, today: NaiveDate) -> f64 {
        let days = (today - effective_date).num_days().max(0) as f64;
        days / AVG_DAYS_PER_MONTH
    }

    /// 单条观测的时效权重 (0,1]
    pub fn weight(&self, effective_date: NaiveDate, today: NaiveDate) -> f64 {
        (-self.age_in_months(effective_date, today) / self.decay_months).exp()
    }

    /// 加权平均成本与平均时效权重
    ///
    /// # 返回
    /// - Some((加权平均成本(分,四舍五入), 平均权重)): 输入非空
    /// - None: 输入为空
    pub fn weighted_average<T: CostRecord>(
        &self,
        observations: &[&T],
        today: NaiveDate,
    ) -> Option<(i64, f64)> {
        if observations.is_empty() {
            return None;
        }

        let mut weighted_sum = 0.0;
        let mut weight_sum = 0.0;
        for obs in observations {
            let w = self.weight(obs.effective_date(), today);
            weighted_sum += obs.cost_price() as f64 * w;
            weight_sum += w;
        }

        let average = (weighted_sum / weight_sum).round() as i64;
        let avg_weight = weight_sum / observations.len() as f64;
        Some((average, avg_weight))
    }

    /// 一组观测的平均时效权重（插值档评分用,成本不走加权平均）
    pub fn average_weight<T: CostRecord>(&self, observations: &[&T], today: NaiveDate) -> f64 {
        if observations.is_empty() {
            return 0.0;
        }
        let sum: f64 = observations
            .iter()
            .map(|o| self.weight(o.effective_date(), today))
            .sum();
        sum / observations.len() as f64
    }
}
