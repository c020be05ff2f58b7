// ==========================================
// 皮带秤维保成本估算系统 - 砝码估算编排器
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 4.7 族级编排
// ==========================================
// 红线: 步骤3.5 重量类别限定 —— 轻型/重型在250kg边界处
//       成本模型不连续,插值与模糊匹配永不跨类别取点
// ==========================================

use crate::config::EstimationConfig;
use crate::domain::estimate::BilletWeightEstimate;
use crate::domain::observation::BilletWeightObservation;
use crate::domain::request::BilletWeightRequest;
use crate::domain::types::{MatchMethod, WeightCategory};
use crate::engine::confidence::ConfidenceScorer;
use crate::engine::error::{EstimationError, EstimationResult};
use crate::engine::record::summarize;
use crate::engine::recency::RecencyWeighter;
use crate::engine::{date_filter, fuzzy, interpolator, matcher};
use chrono::NaiveDate;
use tracing::{debug, info};

// ==========================================
// BilletWeightEstimator - 砝码估算器
// ==========================================
pub struct BilletWeightEstimator {
    config: EstimationConfig,
}

impl BilletWeightEstimator {
    /// 创建砝码估算器
    pub fn new(config: EstimationConfig) -> Self {
        Self { config }
    }

    /// 在观测快照上执行一次估算
    pub fn estimate(
        &self,
        observations: &[BilletWeightObservation],
        request: &BilletWeightRequest,
        today: NaiveDate,
    ) -> EstimationResult<BilletWeightEstimate> {
        let weighter = RecencyWeighter::new(self.config.recency_decay_months);
        let scorer = ConfidenceScorer::new(&self.config);
        let boundary = self.config.billet_weight_boundary_kg;
        let category = WeightCategory::from_weight(request.weight_kg, boundary);

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
                && matcher::categorical_eq_bool(o.has_cams, request.has_cams)
        });
        if matched.is_empty() {
            return Err(EstimationError::NoMatchingConfiguration);
        }

        // ==========================================
        // 步骤3.5: 重量类别限定(轻/重边界永不跨越)
        // ==========================================
        debug!(category = %category, "步骤3.5: 重量类别限定");
        let in_category = matcher::narrow(&matched, |o| {
            o.weight_category(boundary) == Some(category)
        });
        if in_category.is_empty() {
            // 类别配置匹配但目标重量类别内无观测 → 数据不足
            return Err(EstimationError::InsufficientData);
        }

        // 步骤4: 精确连续匹配
        debug!(in_category = in_category.len(), "步骤4: 精确连续匹配");
        let exact = matcher::narrow(&in_category, |o| {
            matcher::within_tolerance(
                o.weight_kg,
                Some(request.weight_kg),
                self.config.weight_tolerance_kg,
            )
        });
        if !exact.is_empty() {
            let (cost, avg_weight) = weighter
                .weighted_average(&exact, today)
                .ok_or(EstimationError::InsufficientData)?;
            info!(cost, category = %category, "砝码估算完成: 精确匹配");
            return Ok(self.build(
                request,
                cost,
                category,
                MatchMethod::Exact,
                exact.len(),
                avg_weight,
                summarize(&exact, self.config.matching_summary_limit),
                &scorer,
            ));
        }

        // 步骤5: 两点线性插值(仅在同重量类别内)
        debug!("步骤5: 尝试两点线性插值");
        if let Some(bracket) = interpolator::find_bracket(&in_category, request.weight_kg) {
            let x1 = bracket.below.weight_kg.unwrap_or(request.weight_kg);
            let x2 = bracket.above.weight_kg.unwrap_or(request.weight_kg);
            let cost = interpolator::interpolate(
                x1,
                bracket.below.cost_price as f64,
                x2,
                bracket.above.cost_price as f64,
                request.weight_kg,
            )
            .round() as i64;

            let pair = [bracket.below, bracket.above];
            let avg_weight = weighter.average_weight(&pair, today);
            info!(cost, category = %category, "砝码估算完成: 线性插值");
            return Ok(self.build(
                request,
                cost,
                category,
                MatchMethod::Interpolated,
                pair.len(),
                avg_weight,
                summarize(&pair, self.config.matching_summary_limit),
                &scorer,
            ));
        }

        // 步骤6: 模糊匹配(仅在同重量类别内)
        debug!("步骤6: 模糊匹配");
        let nearest =
            fuzzy::nearest_by_primary(&in_category, request.weight_kg, self.config.fuzzy_nearest_n);
        if !nearest.is_empty() {
            let (cost, avg_weight) = weighter
                .weighted_average(&nearest, today)
                .ok_or(EstimationError::InsufficientData)?;
            info!(cost, category = %category, "砝码估算完成: 近邻加权");
            return Ok(self.build(
                request,
                cost,
                category,
                MatchMethod::Fuzzy,
                nearest.len(),
                avg_weight,
                summarize(&nearest, self.config.matching_summary_limit),
                &scorer,
            ));
        }

        // 步骤7: 各档位穷尽
        Err(EstimationError::InsufficientData)
    }

    /// 组装结果
    #[allow(clippy::too_many_arguments)]
    fn build(
        &self,
        request: &BilletWeightRequest,
        cost: i64,
        category: WeightCategory,
        method: MatchMethod,
        data_points: usize,
        avg_weight: f64,
        matching_entries: Vec<crate::domain::observation::ObservationSummary>,
        scorer: &ConfidenceScorer,
    ) -> BilletWeightEstimate {
        BilletWeightEstimate {
            estimated_cost: cost,
            category,
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

    fn base_obs(weight: f64, cost: i64) -> BilletWeightObservation {
        BilletWeightObservation {
            observation_id: format!("BW-{}", weight),
            effective_date: today(),
            cost_price: cost,
            material_type: Some("铸铁".to_string()),
            has_cams: Some(false),
            weight_kg: Some(weight),
            created_at: Utc::now(),
        }
    }

    fn base_request(weight: f64) -> BilletWeightRequest {
        BilletWeightRequest {
            material_type: Some("铸铁".to_string()),
            has_cams: Some(false),
            weight_kg: weight,
            date_range: DateRangeWindow::All,
        }
    }

    fn estimator() -> BilletWeightEstimator {
        BilletWeightEstimator::new(EstimationConfig::default())
    }

    #[test]
    fn test_boundary_never_bridged_by_interpolation() {
        // 240kg与260kg分属轻/重类别,即使是最近的两点,
        // 也绝不能作为248kg目标的插值括号
        let observations = vec![base_obs(240.0, 30_000), base_obs(260.0, 60_000)];

        let result = estimator().estimate(&observations, &base_request(248.0), today()).unwrap();

        // 只剩轻型类别内的240kg一条 → 模糊匹配,且成本不掺入260kg的价
        assert_eq!(result.category, WeightCategory::Light);
        assert_eq!(result.method, MatchMethod::Fuzzy);
        assert_eq!(result.estimated_cost, 30_000, "不得混入重型类别的价格");
        assert_eq!(result.data_points, 1);
    }

    #[test]
    fn test_heavy_category_request_uses_heavy_only() {
        let observations = vec![
            base_obs(240.0, 30_000),
            base_obs(260.0, 60_000),
            base_obs(300.0, 66_000),
        ];

        let result = estimator().estimate(&observations, &base_request(280.0), today()).unwrap();
        assert_eq!(result.category, WeightCategory::Heavy);
        assert_eq!(result.method, MatchMethod::Interpolated);
        // 60000 + (66000-60000)*(280-260)/(300-260) = 63000
        assert_eq!(result.estimated_cost, 63_000);
    }

    #[test]
    fn test_exact_within_weight_tolerance() {
        let observations = vec![base_obs(100.0, 20_000)];
        let result = estimator().estimate(&observations, &base_request(100.5), today()).unwrap();
        assert_eq!(result.method, MatchMethod::Exact, "0.5kg差在容差1kg内");
        assert_eq!(result.estimated_cost, 20_000);
    }

    #[test]
    fn test_empty_category_is_insufficient_data() {
        // 类别配置匹配,但目标类别(重型)内无任何观测
        let observations = vec![base_obs(100.0, 20_000), base_obs(200.0, 28_000)];
        let err = estimator().estimate(&observations, &base_request(300.0), today()).unwrap_err();
        assert!(matches!(err, EstimationError::InsufficientData));
    }

    #[test]
    fn test_cams_mismatch_fails_fast() {
        let observations = vec![base_obs(100.0, 20_000)];
        let mut request = base_request(100.0);
        request.has_cams = Some(true);

        let err = estimator().estimate(&observations, &request, today()).unwrap_err();
        assert!(matches!(err, EstimationError::NoMatchingConfiguration));
    }
}
