// ==========================================
// 皮带秤维保成本估算系统 - 两点线性插值器
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 4.3 插值器
// ==========================================
// 触发条件: 精确连续匹配失败,且目标两侧各存在至少一条观测
// 算法: 取最近的下括号点与上括号点做两点线性插值
//       estimate = y1 + (y2 - y1) * (x - x1) / (x2 - x1)
// 红线: 这是两点插值,不是回归;只用最近的两个括号点
// ==========================================

use crate::engine::record::CostRecord;

// ==========================================
// Bracket - 插值括号
// ==========================================
/// 目标值两侧最近的一对观测
pub struct Bracket<'a, T> {
    /// 主属性 ≤ 目标的最近观测 (x1, y1)
    pub below: &'a T,
    /// 主属性 > 目标的最近观测 (x2, y2)
    pub above: &'a T,
}

/// 在类别匹配集中寻找目标值的插值括号
///
/// 主属性缺失的观测不参与;同侧多条时各取距目标最近的一条。
/// 任一侧为空则无括号,返回 None(由模糊匹配兜底)。
pub fn find_bracket<'a, T: CostRecord>(
    observations: &[&'a T],
    target: f64,
) -> Option<Bracket<'a, T>> {
    let mut below: Option<(&'a T, f64)> = None;
    let mut above: Option<(&'a T, f64)> = None;

    for obs in observations {
        let value = match obs.primary_attr() {
            Some(v) => v,
            None => continue,
        };

        if value <= target {
            let dist = target - value;
            if below.map_or(true, |(_, d)| dist < d) {
                below = Some((obs, dist));
            }
        } else {
            let dist = value - target;
            if above.map_or(true, |(_, d)| dist < d) {
                above = Some((obs, dist));
            }
        }
    }

    match (below, above) {
        (Some((b, _)), Some((a, _))) => Some(Bracket { below: b, above: a }),
        _ => None,
    }
}

/// 两点线性插值
///
/// 退化情形 x1 == x2 直接返回 y1（按构造下/上括号集不相交,
/// 正常不会发生,仅防除零）
pub fn interpolate(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if (x2 - x1).abs() < f64::EPSILON {
        return y1;
    }
    y1 + (y2 - y1) * (x - x1) / (x2 - x1)
}
