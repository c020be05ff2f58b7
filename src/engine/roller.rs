// ==========================================
// 皮带秤维保成本估算系统 - 托辊估算编排器
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 4.7 族级编排
// ==========================================
// 主连续属性为辊面长度,辊径作为次要连续属性只参与精确档;
// 与托辊架一致,按需求数量折算总价
// ==========================================

use crate::config::EstimationConfig;
use crate::domain::estimate::RollerEstimate;
use crate::domain::observation::RollerObservation;
use crate::domain::request::RollerRequest;
use crate::domain::types::MatchMethod;
use crate::engine::confidence::ConfidenceScorer;
use crate::engine::error::{EstimationError, EstimationResult};
use crate::engine::record::summarize;
use crate::engine::recency::RecencyWeighter;
use crate::engine::{date_filter, fuzzy, interpolator, matcher};
use chrono::NaiveDate;
use tracing::{debug, info};

// ==========================================
// RollerEstimator - 托辊估算器
// ==========================================
pub struct RollerEstimator {
    config: EstimationConfig,
}

impl RollerEstimator {
    /// 创建托辊估算器
    pub fn new(config: EstimationConfig) -> Self {
        Self { config }
    }

    /// 在观测快照上执行一次估算
    pub fn estimate(
        &self,
        observations: &[RollerObservation],
        request: &RollerRequest,
        today: NaiveDate,
    ) -> EstimationResult<RollerEstimate> {
        let weighter = RecencyWeighter::new(self.config.recency_decay_months);
        let scorer = ConfidenceScorer::new(&self.config);
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
            matcher::categorical_eq(&o.roller_design, &request.roller_design)
                && matcher::categorical_eq(&o.material_type, &request.material_type)
        });
        if matched.is_empty() {
            return Err(EstimationError::NoMatchingConfiguration);
        }

        // 步骤3: 精确连续匹配(辊面长 + 辊径都在容差内)
        debug!(matched = matched.len(), "步骤3: 精确连续匹配");
        let exact = matcher::narrow(&matched, |o| {
            matcher::within_tolerance(
                o.face_length_mm,
                Some(request.face_length_mm),
                self.config.length_tolerance_mm,
            ) && matcher::within_tolerance(
                o.diameter_mm,
                request.diameter_mm,
                self.config.length_tolerance_mm,
            )
        });
        if !exact.is_empty() {
            let (per_unit, avg_weight) = weighter
                .weighted_average(&exact, today)
                .ok_or(EstimationError::InsufficientData)?;
            info!(per_unit, quantity, "托辊估算完成: 精确匹配");
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

        // 步骤4: 两点线性插值(主属性=辊面长)
        debug!("步骤4: 尝试两点线性插值");
        if let Some(bracket) = interpolator::find_bracket(&matched, request.face_length_mm) {
            let x1 = bracket.below.face_length_mm.unwrap_or(request.face_length_mm);
            let x2 = bracket.above.face_length_mm.unwrap_or(request.face_length_mm);
            let per_unit = interpolator::interpolate(
                x1,
                bracket.below.cost_price as f64,
                x2,
                bracket.above.cost_price as f64,
                request.face_length_mm,
            )
            .round() as i64;

            let pair = [bracket.below, bracket.above];
            let avg_weight = weighter.average_weight(&pair, today);
            info!(per_unit, quantity, "托辊估算完成: 线性插值");
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
        let nearest = fuzzy::nearest_by_primary(
            &matched,
            request.face_length_mm,
            self.config.fuzzy_nearest_n,
        );
        if !nearest.is_empty() {
            let (per_unit, avg_weight) = weighter
                .weighted_average(&nearest, today)
                .ok_or(EstimationError::InsufficientData)?;
            info!(per_unit, quantity, "托辊估算完成: 近邻加权");
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
        request: &RollerRequest,
        per_unit: i64,
        quantity: i64,
        method: MatchMethod,
        data_points: usize,
        avg_weight: f64,
        matching_entries: Vec<crate::domain::observation::ObservationSummary>,
        scorer: &ConfidenceScorer,
    ) -> RollerEstimate {
        RollerEstimate {
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

    fn base_obs(face_length: f64, diameter: f64, cost: i64) -> RollerObservation {
        RollerObservation {
            observation_id: format!("RL-{}", face_length),
            effective_date: today(),
            cost_price: cost,
            roller_design: Some("平行辊".to_string()),
            material_type: Some("碳钢".to_string()),
            face_length_mm: Some(face_length),
            diameter_mm: Some(diameter),
            quantity: 1,
            created_at: Utc::now(),
        }
    }

    fn base_request(face_length: f64, quantity: i64) -> RollerRequest {
        RollerRequest {
            roller_design: Some("平行辊".to_string()),
            material_type: Some("碳钢".to_string()),
            face_length_mm: face_length,
            diameter_mm: None,
            quantity,
            date_range: DateRangeWindow::All,
        }
    }

    fn estimator() -> RollerEstimator {
        RollerEstimator::new(EstimationConfig::default())
    }

    #[test]
    fn test_exact_then_quantity_scaled() {
        let observations = vec![base_obs(750.0, 108.0, 12_000)];
        let result = estimator().estimate(&observations, &base_request(750.0, 8), today()).unwrap();
        assert_eq!(result.method, MatchMethod::Exact);
        assert_eq!(result.estimated_cost_per_unit, 12_000);
        assert_eq!(result.estimated_cost_total, 96_000);
    }

    #[test]
    fn test_diameter_participates_in_exact_only() {
        // 辊径不在容差内 → 精确档失败;但插值仍按辊面长进行
        let observations = vec![base_obs(700.0, 89.0, 10_000), base_obs(800.0, 89.0, 12_000)];
        let mut request = base_request(750.0, 1);
        request.diameter_mm = Some(133.0); // 与观测辊径差44mm

        let result = estimator().estimate(&observations, &request, today()).unwrap();
        assert_eq!(result.method, MatchMethod::Interpolated, "精确档因辊径落空,走插值");
        assert_eq!(result.estimated_cost_per_unit, 11_000);
    }

    #[test]
    fn test_design_mismatch_fails_fast() {
        let observations = vec![base_obs(750.0, 108.0, 12_000)];
        let mut request = base_request(750.0, 1);
        request.roller_design = Some("梯形辊".to_string());

        let err = estimator().estimate(&observations, &request, today()).unwrap_err();
        assert!(matches!(err, EstimationError::NoMatchingConfiguration));
    }

    #[test]
    fn test_fuzzy_takes_nearest_three() {
        let observations = vec![
            base_obs(500.0, 89.0, 8_000),
            base_obs(600.0, 89.0, 9_000),
            base_obs(650.0, 89.0, 9_500),
            base_obs(700.0, 89.0, 10_000),
        ];

        // 目标900mm在所有观测之上 → 模糊匹配取最近3条(700/650/600)
        let result = estimator().estimate(&observations, &base_request(900.0, 2), today()).unwrap();
        assert_eq!(result.method, MatchMethod::Fuzzy);
        assert_eq!(result.data_points, 3);
        // 同日观测,加权平均=算术平均 (10000+9500+9000)/3 = 9500
        assert_eq!(result.estimated_cost_per_unit, 9_500);
        assert_eq!(result.estimated_cost_total, 19_000);
    }
}
