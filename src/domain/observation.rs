// ==========================================
// 皮带秤维保成本估算系统 - 历史成本观测实体
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 3. 数据模型
// 红线: 观测记录一经录入不可变,且只属于一个部件族
// ==========================================
// 说明: cost_price 统一使用最小货币单位(分)的整数,
//       避免小数累计舍入漂移
// ==========================================

use crate::domain::types::{ComponentFamily, WeightCategory};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// WeighModuleObservation - 称重模块观测
// ==========================================
// 类别属性: material_type / model_id / idler_spacing_mm
// 连续属性: belt_width_mm(主属性) / capacity_kg_per_m
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeighModuleObservation {
    /// 观测记录ID
    pub observation_id: String,
    /// 价格生效日期
    pub effective_date: NaiveDate,
    /// 成本价(分)
    pub cost_price: i64,

    /// 材质类型(类别属性)
    pub material_type: Option<String>,
    /// 控制器型号(类别属性)
    pub model_id: Option<String>,
    /// 托辊间距mm(类别属性,数值相等才可比)
    pub idler_spacing_mm: Option<f64>,

    /// 带宽mm(主连续属性)
    pub belt_width_mm: Option<f64>,
    /// 输送能力kg/m(连续属性)
    pub capacity_kg_per_m: Option<f64>,

    /// 录入时间
    pub created_at: DateTime<Utc>,
}

// ==========================================
// IdlerFrameObservation - 托辊架观测
// ==========================================
// 类别属性: material_type / transom_type
// 连续属性: belt_width_mm(主属性) / capacity_kg_per_m
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlerFrameObservation {
    pub observation_id: String,
    pub effective_date: NaiveDate,
    /// 单价(分)
    pub cost_price: i64,

    /// 材质类型(类别属性)
    pub material_type: Option<String>,
    /// 横梁类型(类别属性)
    pub transom_type: Option<String>,

    /// 带宽mm(主连续属性)
    pub belt_width_mm: Option<f64>,
    /// 输送能力kg/m(连续属性)
    pub capacity_kg_per_m: Option<f64>,

    /// 采购数量(历史记录中的件数)
    pub quantity: i64,

    pub created_at: DateTime<Utc>,
}

// ==========================================
// BilletWeightObservation - 砝码观测
// ==========================================
// 类别属性: material_type / has_cams
// 连续属性: weight_kg(主属性)
// 红线: 轻型/重型类别间成本不连续,匹配永不跨类别
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BilletWeightObservation {
    pub observation_id: String,
    pub effective_date: NaiveDate,
    /// 成本价(分)
    pub cost_price: i64,

    /// 材质类型(类别属性)
    pub material_type: Option<String>,
    /// 是否带凸轮锁紧(类别属性)
    pub has_cams: Option<bool>,

    /// 重量kg(主连续属性)
    pub weight_kg: Option<f64>,

    pub created_at: DateTime<Utc>,
}

impl BilletWeightObservation {
    /// 观测所属的重量类别（weight_kg 缺失时返回 None）
    pub fn weight_category(&self, boundary_kg: f64) -> Option<WeightCategory> {
        self.weight_kg
            .map(|w| WeightCategory::from_weight(w, boundary_kg))
    }
}

// ==========================================
// RollerObservation - 托辊观测
// ==========================================
// 类别属性: roller_design / material_type
// 连续属性: face_length_mm(主属性) / diameter_mm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollerObservation {
    pub observation_id: String,
    pub effective_date: NaiveDate,
    /// 单价(分)
    pub cost_price: i64,

    /// 辊体结构设计(类别属性)
    pub roller_design: Option<String>,
    /// 材质类型(类别属性)
    pub material_type: Option<String>,

    /// 辊面长度mm(主连续属性)
    pub face_length_mm: Option<f64>,
    /// 辊径mm(连续属性)
    pub diameter_mm: Option<f64>,

    /// 采购数量(历史记录中的件数)
    pub quantity: i64,

    pub created_at: DateTime<Utc>,
}

// ==========================================
// ObservationSummary - 观测摘要(返回给前端,每族一个变体)
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 6. 结果对象
// 说明: 每个估算结果最多携带5条摘要,用于展示"估算依据"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObservationSummary {
    WeighModule {
        effective_date: NaiveDate,
        cost_price: i64,
        belt_width_mm: Option<f64>,
        capacity_kg_per_m: Option<f64>,
    },
    IdlerFrame {
        effective_date: NaiveDate,
        cost_price: i64,
        belt_width_mm: Option<f64>,
        quantity: i64,
    },
    BilletWeight {
        effective_date: NaiveDate,
        cost_price: i64,
        weight_kg: Option<f64>,
    },
    Roller {
        effective_date: NaiveDate,
        cost_price: i64,
        face_length_mm: Option<f64>,
        diameter_mm: Option<f64>,
        quantity: i64,
    },
}

impl ObservationSummary {
    /// 摘要所属的部件族
    pub fn family(&self) -> ComponentFamily {
        match self {
            ObservationSummary::WeighModule { .. } => ComponentFamily::WeighModule,
            ObservationSummary::IdlerFrame { .. } => ComponentFamily::IdlerFrame,
            ObservationSummary::BilletWeight { .. } => ComponentFamily::BilletWeight,
            ObservationSummary::Roller { .. } => ComponentFamily::Roller,
        }
    }
}

impl From<&WeighModuleObservation> for ObservationSummary {
    fn from(obs: &WeighModuleObservation) -> Self {
        ObservationSummary::WeighModule {
            effective_date: obs.effective_date,
            cost_price: obs.cost_price,
            belt_width_mm: obs.belt_width_mm,
            capacity_kg_per_m: obs.capacity_kg_per_m,
        }
    }
}

impl From<&IdlerFrameObservation> for ObservationSummary {
    fn from(obs: &IdlerFrameObservation) -> Self {
        ObservationSummary::IdlerFrame {
            effective_date: obs.effective_date,
            cost_price: obs.cost_price,
            belt_width_mm: obs.belt_width_mm,
            quantity: obs.quantity,
        }
    }
}

impl From<&BilletWeightObservation> for ObservationSummary {
    fn from(obs: &BilletWeightObservation) -> Self {
        ObservationSummary::BilletWeight {
            effective_date: obs.effective_date,
            cost_price: obs.cost_price,
            weight_kg: obs.weight_kg,
        }
    }
}

impl From<&RollerObservation> for ObservationSummary {
    fn from(obs: &RollerObservation) -> Self {
        ObservationSummary::Roller {
            effective_date: obs.effective_date,
            cost_price: obs.cost_price,
            face_length_mm: obs.face_length_mm,
            diameter_mm: obs.diameter_mm,
            quantity: obs.quantity,
        }
    }
}
