// ==========================================
// 皮带秤维保成本估算系统 - 属性匹配器
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 4.2 匹配器
// ==========================================
// 红线: 类别属性必须精确相等(请求缺省=通配);
//       类别不匹配视为"不可比"而非"距离远",
//       永不降级为类别上的模糊匹配
// 连续属性: 在固定绝对容差内视为精确匹配
// ==========================================

/// 数值型类别属性的相等判定容差（如托辊间距）
const CATEGORICAL_NUMERIC_EPSILON: f64 = 1e-6;

// ==========================================
// 类别属性判定
// ==========================================

/// 字符串类别属性匹配
///
/// 规则:
/// - 请求为 None → 通配,任何观测都通过
/// - 请求为 Some → 观测值必须存在且相等
pub fn categorical_eq(observed: &Option<String>, requested: &Option<String>) -> bool {
    match requested {
        None => true,
        Some(want) => observed.as_deref() == Some(want.as_str()),
    }
}

/// 布尔类别属性匹配（请求 None = 通配）
pub fn categorical_eq_bool(observed: Option<bool>, requested: Option<bool>) -> bool {
    match requested {
        None => true,
        Some(want) => observed == Some(want),
    }
}

/// 数值类别属性匹配（请求 None = 通配;相等判定带极小容差）
pub fn categorical_eq_num(observed: Option<f64>, requested: Option<f64>) -> bool {
    match requested {
        None => true,
        Some(want) => match observed {
            Some(v) => (v - want).abs() < CATEGORICAL_NUMERIC_EPSILON,
            None => false,
        },
    }
}

// ==========================================
// 连续属性判定
// ==========================================

/// 连续属性容差匹配
///
/// 规则:
/// - 目标为 None → 不校验该属性
/// - 目标为 Some 而观测值缺失 → 不匹配
/// - 差的绝对值 < tolerance → 匹配
pub fn within_tolerance(observed: Option<f64>, target: Option<f64>, tolerance: f64) -> bool {
    match target {
        None => true,
        Some(want) => match observed {
            Some(v) => (v - want).abs() < tolerance,
            None => false,
        },
    }
}

// ==========================================
// 集合过滤
// ==========================================

/// 按谓词收窄引用集合（类别收窄与精确连续匹配共用）
pub fn narrow<'a, T>(observations: &[&'a T], predicate: impl Fn(&T) -> bool) -> Vec<&'a T> {
    observations
        .iter()
        .copied()
        .filter(|o| predicate(o))
        .collect()
}
