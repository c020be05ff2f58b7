// ==========================================
// 皮带秤维保成本估算系统 - 托辊架估算编排器
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 4.7 族级编排
// ==========================================
// 与称重模块流程一致,另按需求数量折算总价:
// estimated_cost_total = estimated_cost_per_unit × quantity
// ==========================================

use crate::config::EstimationConfig;
use crate::domain::estimate::IdlerFrameEstimate;
use crate::domain::observation::IdlerFrameObservation;
use crate::domain::request::IdlerFrameRequest;
use crate::domain::types::MatchMethod;
use crate::engine::confidence::ConfidenceScorer;
use crate::engine::error::{EstimationError, EstimationResult};
use crate::engine::record::summarize;
use crate::engine::recency::RecencyWeighter;
use crate::engine::{date_filter, fuzzy, interpolator, matcher};
use chrono::NaiveDate;
use tracing::{debug, info};

// ==========================================
// IdlerFrameEstimator - 托辊架估算器
// ==========================================
pub struct IdlerFrameEstimator {
    config: EstimationConfig,
}

impl IdlerFrameEstimator {
    /// 创建托辊架估算器
    pub fn new(config: EstimationConfig) -> Self {
        Self { config }
    }

    /// 在观测快照上执行一次估算
    pub fn estimate(
        &self,
        observations: &[IdlerFrameObservation],
        request: &IdlerFrameRequest,
        today: NaiveDate,
    ) -> EstimationResult<IdlerFrameEstimate> {
        let weighter = RecencyWeighter::new(self.config.recency_decay_months);
        let scorer = ConfidenceScorer::new(&self.config);
        // 数量下限1,避免0/负数把总价清零
        let quantity = request.quantity.max(1);

        // 步骤1: 日期范围过滤
        debug!(window = %request.date_range, total = observations.len(), "步骤1: 日期范围过滤");
        let in_range = date_filter::filter_by_window(observations, request.date_range, today);
        if in_range.is_empty() {
            return Err(EstimationError::NoDataInRange);
        }

        // 步骤2: 类别属性收窄
        debug!(in_range = in_range.len(), "步骤2: 类别属性收窄");
        let matched = matcher::narrow(&in_range, |o| {
            matcher::categorical_eq(&o.material_type, &request.material_type)
                && matcher::categorical_eq(&o.transom_type, &request.transom_type)
        });
        if matched.is_empty() {
            return Err(EstimationError::NoMatchingConfiguration);
        }

        // 步骤3: 精确连续匹配
        debug!(matched = matched.len(), "步骤3: 精确连续匹配");
        let exact = matcher::narrow(&matched, |o| {
            matcher::within_tolerance(
                o.belt_width_mm,
                Some(request.belt_width_mm),
                self.config.length_tolerance_mm,
            ) && matcher::within_tolerance(
                o.capacity_kg_per_m,
                request.capacity_kg_per_m,
                self.config.capacity_tolerance,
            )
        });
        if !exact.is_empty() {
            let (per_unit, avg_weight) = weighter
                .weighted_average(&exact, today)
                .ok_or(EstimationError::InsufficientData)?;
            info!(per_unit, quantity, "托辊架估算完成: 精确匹配");
            return Ok(self.build(
                request,
                per_unit,
                quantity,
                MatchMethod::Exact,
                exact.len(),
                avg_weight,
                summarize(&exact, self.config.matching_summary_limit),
                &scorer,
            ));
        }

        // 步骤4: 两点线性插值
        debug!("步骤4: 尝试两点线性插值");
        if let Some(bracket) = interpolator::find_bracket(&matched, request.belt_width_mm) {
            let x1 = bracket.below.belt_width_mm.unwrap_or(request.belt_width_mm);
            let x2 = bracket.above.belt_width_mm.unwrap_or(request.belt_width_mm);
            let per_unit = interpolator::interpolate(
                x1,
                bracket.below.cost_price as f64,
                x2,
                bracket.above.cost_price as f64,
                request.belt_width_mm,
            )
            .round() as i64;

            let pair = [bracket.below, bracket.above];
            let avg_weight = weighter.average_weight(&pair, today);
            info!(per_unit, quantity, "托辊架估算完成: 线性插值");
            return Ok(self.build(
                request,
                per_unit,
                quantity,
                MatchMethod::Interpolated,
                pair.len(),
                avg_weight,
                summarize(&pair, self.config.matching_summary_limit),
                &scorer,
            ));
        }

        // 步骤5: 模糊匹配
        debug!("步骤5: 模糊匹配");
        let nearest =
            fuzzy::nearest_by_primary(&matched, request.belt_width_mm, self.config.fuzzy_nearest_n);
        if !nearest.is_empty() {
            let (per_unit, avg_weight) = weighter
                .weighted_average(&nearest, today)
                .ok_or(EstimationError::InsufficientData)?;
            info!(per_unit, quantity, "托辊架估算完成: 近邻加权");
            return Ok(self.build(
                request,
                per_unit,
                quantity,
                MatchMethod::Fuzzy,
                nearest.len(),
                avg_weight,
                summarize(&nearest, self.config.matching_summary_limit),
                &scorer,
            ));
        }

        // 步骤6: 各档位穷尽
        Err(EstimationError::InsufficientData)
    }

    /// 组装结果（单价×数量=总价）
    #[allow(clippy::too_many_arguments)]
    fn build(
        &self,
        request: &IdlerFrameRequest,
        per_unit: i64,
        quantity: i64,
        method: MatchMethod,
        data_points: usize,
        avg_weight: f64,
        matching_entries: Vec<crate::domain::observation::ObservationSummary>,
        scorer: &ConfidenceScorer,
    ) -> IdlerFrameEstimate {
        IdlerFrameEstimate {
            estimated_cost_per_unit: per_unit,
            estimated_cost_total: per_unit * quantity,
            quantity,
            confidence: scorer.score(method, data_points, avg_weight),
            method,
            data_points,
            matching_entries,
            date_range: request.date_range.label(),
        }
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::DateRangeWindow;
    use chrono::Utc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    fn base_obs(width: f64, cost: i64) -> IdlerFrameObservation {
        IdlerFrameObservation {
            observation_id: format!("IF-{}", width),
            effective_date: today(),
            cost_price: cost,
            material_type: Some("碳钢".to_string()),
            transom_type: Some("槽形".to_string()),
            belt_width_mm: Some(width),
            capacity_kg_per_m: None,
            quantity: 1,
            created_at: Utc::now(),
        }
    }

    fn base_request(width: f64, quantity: i64) -> IdlerFrameRequest {
        IdlerFrameRequest {
            material_type: Some("碳钢".to_string()),
            transom_type: Some("槽形".to_string()),
            belt_width_mm: width,
            capacity_kg_per_m: None,
            quantity,
            date_range: DateRangeWindow::All,
        }
    }

    #[test]
    fn test_quantity_scaling() {
        // 总价 = 单价 × 数量,对所有成功结果成立
        let observations = vec![base_obs(1200.0, 8_500)];
        let estimator = IdlerFrameEstimator::new(EstimationConfig::default());

        for quantity in [1, 4, 12] {
            let result = estimator
                .estimate(&observations, &base_request(1200.0, quantity), today())
                .unwrap();
            assert_eq!(result.estimated_cost_per_unit, 8_500);
            assert_eq!(
                result.estimated_cost_total,
                result.estimated_cost_per_unit * quantity,
                "总价应等于单价×{}",
                quantity
            );
        }
    }

    #[test]
    fn test_quantity_floor_is_one() {
        // 数量0/负数按1处理
        let observations = vec![base_obs(1200.0, 8_500)];
        let estimator = IdlerFrameEstimator::new(EstimationConfig::default());
        let result = estimator
            .estimate(&observations, &base_request(1200.0, 0), today())
            .unwrap();
        assert_eq!(result.quantity, 1);
        assert_eq!(result.estimated_cost_total, 8_500);
    }

    #[test]
    fn test_interpolated_per_unit_then_scaled() {
        let observations = vec![base_obs(1000.0, 7_000), base_obs(1400.0, 9_000)];
        let estimator = IdlerFrameEstimator::new(EstimationConfig::default());
        let result = estimator
            .estimate(&observations, &base_request(1200.0, 3), today())
            .unwrap();
        assert_eq!(result.method, MatchMethod::Interpolated);
        assert_eq!(result.estimated_cost_per_unit, 8_000, "中点插值");
        assert_eq!(result.estimated_cost_total, 24_000);
    }

    #[test]
    fn test_transom_type_mismatch_fails_fast() {
        let observations = vec![base_obs(1200.0, 8_500)];
        let mut request = base_request(1200.0, 1);
        request.transom_type = Some("平形".to_string());

        let err = IdlerFrameEstimator::new(EstimationConfig::default())
            .estimate(&observations, &request, today())
            .unwrap_err();
        assert!(matches!(err, EstimationError::NoMatchingConfiguration));
    }
}
