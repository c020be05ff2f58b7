// ==========================================
// 皮带秤维保成本估算系统 - 观测记录抽象
// ==========================================
// 职责: 为日期过滤/插值/模糊匹配/时效加权提供统一访问面,
//       四个部件族的观测都实现此 trait
// ==========================================

use crate::domain::observation::{
    BilletWeightObservation, IdlerFrameObservation, ObservationSummary, RollerObservation,
    WeighModuleObservation,
};
use chrono::NaiveDate;

// ==========================================
// CostRecord - 成本观测记录
// ==========================================
/// 引擎原语所需的观测记录访问面
///
/// primary_attr 是该部件族的"主连续属性"(带宽/重量/辊面长),
/// 插值与模糊匹配只作用于主属性
pub trait CostRecord {
    /// 价格生效日期
    fn effective_date(&self) -> NaiveDate;

    /// 成本价(分)
    fn cost_price(&self) -> i64;

    /// 主连续属性取值(历史记录缺失该字段时为 None)
    fn primary_attr(&self) -> Option<f64>;
}

impl CostRecord for WeighModuleObservation {
    fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }
    fn cost_price(&self) -> i64 {
        self.cost_price
    }
    fn primary_attr(&self) -> Option<f64> {
        self.belt_width_mm
    }
}

impl CostRecord for IdlerFrameObservation {
    fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }
    fn cost_price(&self) -> i64 {
        self.cost_price
    }
    fn primary_attr(&self) -> Option<f64> {
        self.belt_width_mm
    }
}

impl CostRecord for BilletWeightObservation {
    fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }
    fn cost_price(&self) -> i64 {
        self.cost_price
    }
    fn primary_attr(&self) -> Option<f64> {
        self.weight_kg
    }
}

impl CostRecord for RollerObservation {
    fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }
    fn cost_price(&self) -> i64 {
        self.cost_price
    }
    fn primary_attr(&self) -> Option<f64> {
        self.face_length_mm
    }
}

// ==========================================
// 摘要辅助
// ==========================================

/// 生成估算依据摘要：按生效日期倒序取前 limit 条
pub(crate) fn summarize<'a, T>(matched: &[&'a T], limit: usize) -> Vec<ObservationSummary>
where
    T: CostRecord,
    ObservationSummary: From<&'a T>,
{
    let mut refs: Vec<&'a T> = matched.to_vec();
    refs.sort_by(|a, b| b.effective_date().cmp(&a.effective_date()));
    refs.into_iter()
        .take(limit)
        .map(ObservationSummary::from)
        .collect()
}
