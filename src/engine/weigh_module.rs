// ==========================================
// 皮带秤维保成本估算系统 - 称重模块估算编排器
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 4.7 族级编排
// ==========================================
// 流程: 日期过滤 → 类别收窄 → 精确匹配 → 插值 → 模糊匹配
// 红线: 类别收窄为空立即失败,不降级;
//       每次请求在本地观测快照上纯函数式计算,无跨请求状态
// ==========================================

use crate::config::EstimationConfig;
use crate::domain::estimate::WeighModuleEstimate;
use crate::domain::observation::WeighModuleObservation;
use crate::domain::request::WeighModuleRequest;
use crate::domain::types::MatchMethod;
use crate::engine::confidence::ConfidenceScorer;
use crate::engine::error::{EstimationError, EstimationResult};
use crate::engine::record::summarize;
use crate::engine::recency::RecencyWeighter;
use crate::engine::{date_filter, fuzzy, interpolator, matcher};
use chrono::NaiveDate;
use tracing::{debug, info};

// ==========================================
// WeighModuleEstimator - 称重模块估算器
// ==========================================
pub struct WeighModuleEstimator {
    config: EstimationConfig,
}

impl WeighModuleEstimator {
    /// 创建称重模块估算器
    pub fn new(config: EstimationConfig) -> Self {
        Self { config }
    }

    /// 在观测快照上执行一次估算
    ///
    /// # 参数
    /// - observations: 称重模块观测快照
    /// - request: 估算请求
    /// - today: 当前日期
    pub fn estimate(
        &self,
        observations: &[WeighModuleObservation],
        request: &WeighModuleRequest,
        today: NaiveDate,
    ) -> EstimationResult<WeighModuleEstimate> {
        let weighter = RecencyWeighter::new(self.config.recency_decay_months);
        let scorer = ConfidenceScorer::new(&self.config);

        // ==========================================
        // 步骤1: 日期范围过滤
        // ==========================================
        debug!(window = %request.date_range, total = observations.len(), "步骤1: 日期范围过滤");
        let in_range = date_filter::filter_by_window(observations, request.date_range, today);
        if in_range.is_empty() {
            return Err(EstimationError::NoDataInRange);
        }

        // ==========================================
        // 步骤2: 类别属性收窄(精确相等,缺省通配)
        // ==========================================
        debug!(in_range = in_range.len(), "步骤2: 类别属性收窄");
        let matched = matcher::narrow(&in_range, |o| {
            matcher::categorical_eq(&o.material_type, &request.material_type)
                && matcher::categorical_eq(&o.model_id, &request.model_id)
                && matcher::categorical_eq_num(o.idler_spacing_mm, request.idler_spacing_mm)
        });
        if matched.is_empty() {
            return Err(EstimationError::NoMatchingConfiguration);
        }

        // ==========================================
        // 步骤3: 精确连续匹配(容差内)
        // ==========================================
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
            let (cost, avg_weight) = weighter
                .weighted_average(&exact, today)
                .ok_or(EstimationError::InsufficientData)?;
            info!(cost, data_points = exact.len(), "称重模块估算完成: 精确匹配");
            return Ok(WeighModuleEstimate {
                estimated_cost: cost,
                confidence: scorer.score(MatchMethod::Exact, exact.len(), avg_weight),
                method: MatchMethod::Exact,
                data_points: exact.len(),
                matching_entries: summarize(&exact, self.config.matching_summary_limit),
                date_range: request.date_range.label(),
            });
        }

        // ==========================================
        // 步骤4: 两点线性插值(目标两侧存在括号时)
        // ==========================================
        debug!("步骤4: 尝试两点线性插值");
        if let Some(bracket) = interpolator::find_bracket(&matched, request.belt_width_mm) {
            // 括号点必有主属性,unwrap_or 仅为防御性兜底
            let x1 = bracket.below.belt_width_mm.unwrap_or(request.belt_width_mm);
            let x2 = bracket.above.belt_width_mm.unwrap_or(request.belt_width_mm);
            let cost = interpolator::interpolate(
                x1,
                bracket.below.cost_price as f64,
                x2,
                bracket.above.cost_price as f64,
                request.belt_width_mm,
            )
            .round() as i64;

            let pair = [bracket.below, bracket.above];
            let avg_weight = weighter.average_weight(&pair, today);
            info!(cost, "称重模块估算完成: 线性插值");
            return Ok(WeighModuleEstimate {
                estimated_cost: cost,
                confidence: scorer.score(MatchMethod::Interpolated, pair.len(), avg_weight),
                method: MatchMethod::Interpolated,
                data_points: pair.len(),
                matching_entries: summarize(&pair, self.config.matching_summary_limit),
                date_range: request.date_range.label(),
            });
        }

        // ==========================================
        // 步骤5: 模糊匹配(最近N条时效加权平均)
        // ==========================================
        debug!("步骤5: 模糊匹配");
        let nearest =
            fuzzy::nearest_by_primary(&matched, request.belt_width_mm, self.config.fuzzy_nearest_n);
        if !nearest.is_empty() {
            let (cost, avg_weight) = weighter
                .weighted_average(&nearest, today)
                .ok_or(EstimationError::InsufficientData)?;
            info!(cost, data_points = nearest.len(), "称重模块估算完成: 近邻加权");
            return Ok(WeighModuleEstimate {
                estimated_cost: cost,
                confidence: scorer.score(MatchMethod::Fuzzy, nearest.len(), avg_weight),
                method: MatchMethod::Fuzzy,
                data_points: nearest.len(),
                matching_entries: summarize(&nearest, self.config.matching_summary_limit),
                date_range: request.date_range.label(),
            });
        }

        // ==========================================
        // 步骤6: 各档位穷尽(仅当匹配观测全部缺失主属性)
        // ==========================================
        Err(EstimationError::InsufficientData)
    }
}
