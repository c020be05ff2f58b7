// ==========================================
// 皮带秤维保成本估算系统 - 估算API门面
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 6. 对外接口
// ==========================================
// 职责: 每个部件族一次数据读取 + 一次同步估算管线,
//       把类型化结果/错误统一折叠为 success 判别的响应对象
// 红线: 估算失败不抛出,以 {success:false, error} 返回,
//       由前端决定提示方式
// ==========================================

use crate::config::EstimationConfig;
use crate::domain::estimate::{
    BilletWeightEstimate, Confidence, IdlerFrameEstimate, RollerEstimate, WeighModuleEstimate,
};
use crate::domain::observation::ObservationSummary;
use crate::domain::request::{
    BilletWeightRequest, IdlerFrameRequest, RollerRequest, WeighModuleRequest,
};
use crate::domain::types::WeightCategory;
use crate::engine::error::EstimationError;
use crate::engine::{
    BilletWeightEstimator, IdlerFrameEstimator, RollerEstimator, WeighModuleEstimator,
};
use crate::repository::observation_repo::ObservationReader;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

// ==========================================
// EstimationResponse - 统一响应对象
// ==========================================
/// 估算响应（success 判别联合）
///
/// 成功时携带估算字段；失败时携带错误消息与错误码，
/// 永不同时出现。数量族（托辊架/托辊）额外携带单价/总价/数量，
/// 砝码族额外携带重量类别。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationResponse {
    pub success: bool,

    // ---- 失败分支 ----
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,

    // ---- 成功分支 ----
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost_per_unit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost_total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<WeightCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    /// 匹配方式展示标签(如"线性插值")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_points: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_entries: Option<Vec<ObservationSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
}

impl EstimationResponse {
    /// 失败响应
    fn failure(err: &EstimationError) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
            error_code: Some(err.code().to_string()),
            estimated_cost: None,
            estimated_cost_per_unit: None,
            estimated_cost_total: None,
            quantity: None,
            category: None,
            confidence: None,
            method: None,
            data_points: None,
            matching_entries: None,
            date_range: None,
        }
    }

    /// 成功响应骨架（各族在此基础上补充扩展字段）
    fn success_base(
        cost: i64,
        confidence: Confidence,
        method: String,
        data_points: usize,
        matching_entries: Vec<ObservationSummary>,
        date_range: String,
    ) -> Self {
        Self {
            success: true,
            error: None,
            error_code: None,
            estimated_cost: Some(cost),
            estimated_cost_per_unit: None,
            estimated_cost_total: None,
            quantity: None,
            category: None,
            confidence: Some(confidence),
            method: Some(method),
            data_points: Some(data_points),
            matching_entries: Some(matching_entries),
            date_range: Some(date_range),
        }
    }
}

impl From<WeighModuleEstimate> for EstimationResponse {
    fn from(e: WeighModuleEstimate) -> Self {
        Self::success_base(
            e.estimated_cost,
            e.confidence,
            e.method.label().to_string(),
            e.data_points,
            e.matching_entries,
            e.date_range,
        )
    }
}

impl From<IdlerFrameEstimate> for EstimationResponse {
    fn from(e: IdlerFrameEstimate) -> Self {
        let mut resp = Self::success_base(
            e.estimated_cost_total,
            e.confidence,
            e.method.label().to_string(),
            e.data_points,
            e.matching_entries,
            e.date_range,
        );
        resp.estimated_cost_per_unit = Some(e.estimated_cost_per_unit);
        resp.estimated_cost_total = Some(e.estimated_cost_total);
        resp.quantity = Some(e.quantity);
        resp
    }
}

impl From<BilletWeightEstimate> for EstimationResponse {
    fn from(e: BilletWeightEstimate) -> Self {
        let mut resp = Self::success_base(
            e.estimated_cost,
            e.confidence,
            e.method.label().to_string(),
            e.data_points,
            e.matching_entries,
            e.date_range,
        );
        resp.category = Some(e.category);
        resp
    }
}

impl From<RollerEstimate> for EstimationResponse {
    fn from(e: RollerEstimate) -> Self {
        let mut resp = Self::success_base(
            e.estimated_cost_total,
            e.confidence,
            e.method.label().to_string(),
            e.data_points,
            e.matching_entries,
            e.date_range,
        );
        resp.estimated_cost_per_unit = Some(e.estimated_cost_per_unit);
        resp.estimated_cost_total = Some(e.estimated_cost_total);
        resp.quantity = Some(e.quantity);
        resp
    }
}

// ==========================================
// EstimationApi - 估算门面
// ==========================================
pub struct EstimationApi {
    reader: Arc<dyn ObservationReader>,
    weigh_module: WeighModuleEstimator,
    idler_frame: IdlerFrameEstimator,
    billet_weight: BilletWeightEstimator,
    roller: RollerEstimator,
}

impl EstimationApi {
    /// 创建估算门面（数据访问接口注入）
    pub fn new(reader: Arc<dyn ObservationReader>, config: EstimationConfig) -> Self {
        Self {
            reader,
            weigh_module: WeighModuleEstimator::new(config.clone()),
            idler_frame: IdlerFrameEstimator::new(config.clone()),
            billet_weight: BilletWeightEstimator::new(config.clone()),
            roller: RollerEstimator::new(config),
        }
    }

    /// 称重模块成本估算
    pub async fn estimate_weigh_module(&self, request: &WeighModuleRequest) -> EstimationResponse {
        self.estimate_weigh_module_at(request, Local::now().date_naive())
            .await
    }

    /// 称重模块成本估算（指定基准日,供测试与回放使用）
    pub async fn estimate_weigh_module_at(
        &self,
        request: &WeighModuleRequest,
        today: NaiveDate,
    ) -> EstimationResponse {
        info!(belt_width = request.belt_width_mm, "收到称重模块估算请求");
        let observations = match self.reader.weigh_module_observations().await {
            Ok(v) => v,
            Err(e) => return Self::data_failure(e),
        };
        match self.weigh_module.estimate(&observations, request, today) {
            Ok(estimate) => estimate.into(),
            Err(e) => Self::estimate_failure(e),
        }
    }

    /// 托辊架成本估算
    pub async fn estimate_idler_frame(&self, request: &IdlerFrameRequest) -> EstimationResponse {
        self.estimate_idler_frame_at(request, Local::now().date_naive())
            .await
    }

    /// 托辊架成本估算（指定基准日）
    pub async fn estimate_idler_frame_at(
        &self,
        request: &IdlerFrameRequest,
        today: NaiveDate,
    ) -> EstimationResponse {
        info!(
            belt_width = request.belt_width_mm,
            quantity = request.quantity,
            "收到托辊架估算请求"
        );
        let observations = match self.reader.idler_frame_observations().await {
            Ok(v) => v,
            Err(e) => return Self::data_failure(e),
        };
        match self.idler_frame.estimate(&observations, request, today) {
            Ok(estimate) => estimate.into(),
            Err(e) => Self::estimate_failure(e),
        }
    }

    /// 砝码成本估算
    pub async fn estimate_billet_weight(
        &self,
        request: &BilletWeightRequest,
    ) -> EstimationResponse {
        self.estimate_billet_weight_at(request, Local::now().date_naive())
            .await
    }

    /// 砝码成本估算（指定基准日）
    pub async fn estimate_billet_weight_at(
        &self,
        request: &BilletWeightRequest,
        today: NaiveDate,
    ) -> EstimationResponse {
        info!(weight = request.weight_kg, "收到砝码估算请求");
        let observations = match self.reader.billet_weight_observations().await {
            Ok(v) => v,
            Err(e) => return Self::data_failure(e),
        };
        match self.billet_weight.estimate(&observations, request, today) {
            Ok(estimate) => estimate.into(),
            Err(e) => Self::estimate_failure(e),
        }
    }

    /// 托辊成本估算
    pub async fn estimate_roller(&self, request: &RollerRequest) -> EstimationResponse {
        self.estimate_roller_at(request, Local::now().date_naive())
            .await
    }

    /// 托辊成本估算（指定基准日）
    pub async fn estimate_roller_at(
        &self,
        request: &RollerRequest,
        today: NaiveDate,
    ) -> EstimationResponse {
        info!(
            face_length = request.face_length_mm,
            quantity = request.quantity,
            "收到托辊估算请求"
        );
        let observations = match self.reader.roller_observations().await {
            Ok(v) => v,
            Err(e) => return Self::data_failure(e),
        };
        match self.roller.estimate(&observations, request, today) {
            Ok(estimate) => estimate.into(),
            Err(e) => Self::estimate_failure(e),
        }
    }

    /// 数据读取失败 → 失败响应
    fn data_failure(err: crate::repository::error::RepositoryError) -> EstimationResponse {
        warn!(error = %err, "观测数据读取失败");
        EstimationResponse::failure(&EstimationError::from(err))
    }

    /// 估算失败 → 失败响应
    fn estimate_failure(err: EstimationError) -> EstimationResponse {
        info!(code = err.code(), "估算未能给出结果: {}", err);
        EstimationResponse::failure(&err)
    }
}
