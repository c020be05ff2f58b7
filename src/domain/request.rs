// ==========================================
// 皮带秤维保成本估算系统 - 估算请求对象
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 3. 数据模型
// 说明: 请求对象由UI动作临时构造,每族一个显式结构,
//       类别属性为 None 时视为通配(不参与过滤)
// ==========================================

use crate::domain::types::DateRangeWindow;
use serde::{Deserialize, Serialize};

// ==========================================
// WeighModuleRequest - 称重模块估算请求
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeighModuleRequest {
    /// 材质类型(None=通配)
    pub material_type: Option<String>,
    /// 控制器型号(None=通配)
    pub model_id: Option<String>,
    /// 托辊间距mm(None=通配)
    pub idler_spacing_mm: Option<f64>,

    /// 目标带宽mm(主连续属性,必填)
    pub belt_width_mm: f64,
    /// 目标输送能力kg/m(None=不校验)
    pub capacity_kg_per_m: Option<f64>,

    /// 日期范围窗口
    pub date_range: DateRangeWindow,
}

// ==========================================
// IdlerFrameRequest - 托辊架估算请求
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlerFrameRequest {
    /// 材质类型(None=通配)
    pub material_type: Option<String>,
    /// 横梁类型(None=通配)
    pub transom_type: Option<String>,

    /// 目标带宽mm(主连续属性,必填)
    pub belt_width_mm: f64,
    /// 目标输送能力kg/m(None=不校验)
    pub capacity_kg_per_m: Option<f64>,

    /// 需求数量(单价×数量=总价)
    pub quantity: i64,

    /// 日期范围窗口
    pub date_range: DateRangeWindow,
}

// ==========================================
// BilletWeightRequest - 砝码估算请求
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BilletWeightRequest {
    /// 材质类型(None=通配)
    pub material_type: Option<String>,
    /// 是否带凸轮锁紧(None=通配)
    pub has_cams: Option<bool>,

    /// 目标重量kg(主连续属性,必填;决定轻/重类别)
    pub weight_kg: f64,

    /// 日期范围窗口
    pub date_range: DateRangeWindow,
}

// ==========================================
// RollerRequest - 托辊估算请求
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollerRequest {
    /// 辊体结构设计(None=通配)
    pub roller_design: Option<String>,
    /// 材质类型(None=通配)
    pub material_type: Option<String>,

    /// 目标辊面长度mm(主连续属性,必填)
    pub face_length_mm: f64,
    /// 目标辊径mm(None=不校验)
    pub diameter_mm: Option<f64>,

    /// 需求数量(单价×数量=总价)
    pub quantity: i64,

    /// 日期范围窗口
    pub date_range: DateRangeWindow,
}
