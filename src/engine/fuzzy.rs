// ==========================================
// 皮带秤维保成本估算系统 - 模糊匹配器
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 4.4 模糊匹配
// ==========================================
// 触发条件: 无插值括号(观测全在目标一侧,或仅一条观测)
// 算法: 按主属性与目标的绝对距离取最近N条,
//       成本走时效加权平均(见 recency.rs)
// 层级: 最低的非失败档位
// ==========================================

use crate::engine::record::CostRecord;

/// 按主属性绝对距离选取最近的 n 条观测
///
/// 主属性缺失的观测不参与;距离相同按生效日期较新者优先。
pub fn nearest_by_primary<'a, T: CostRecord>(
    observations: &[&'a T],
    target: f64,
    n: usize,
) -> Vec<&'a T> {
    let mut candidates: Vec<(&'a T, f64)> = observations
        .iter()
        .copied()
        .filter_map(|o| o.primary_attr().map(|v| (o, (v - target).abs())))
        .collect();

    candidates.sort_by(|(a, da), (b, db)| {
        da.partial_cmp(db)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.effective_date().cmp(&a.effective_date()))
    });

    candidates.into_iter().take(n).map(|(o, _)| o).collect()
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::observation::RollerObservation;
    use chrono::{NaiveDate, Utc};

    fn obs(face_length: Option<f64>, cost: i64, date: NaiveDate) -> RollerObservation {
        RollerObservation {
            observation_id: "OBS".to_string(),
            effective_date: date,
            cost_price: cost,
            roller_design: None,
            material_type: None,
            face_length_mm: face_length,
            diameter_mm: None,
            quantity: 1,
            created_at: Utc::now(),
        }
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
    }

    #[test]
    fn test_nearest_three_by_distance() {
        let observations = vec![
            obs(Some(500.0), 8_000, d(1)),
            obs(Some(700.0), 10_000, d(2)),
            obs(Some(750.0), 11_000, d(3)),
            obs(Some(1200.0), 15_000, d(4)),
        ];
        let refs: Vec<&RollerObservation> = observations.iter().collect();

        let nearest = nearest_by_primary(&refs, 760.0, 3);
        assert_eq!(nearest.len(), 3);
        // 距目标760最近: 750, 700, 500
        assert_eq!(nearest[0].face_length_mm, Some(750.0));
        assert_eq!(nearest[1].face_length_mm, Some(700.0));
        assert_eq!(nearest[2].face_length_mm, Some(500.0));
    }

    #[test]
    fn test_fewer_than_n_returns_all() {
        let observations = vec![obs(Some(700.0), 10_000, d(1))];
        let refs: Vec<&RollerObservation> = observations.iter().collect();
        assert_eq!(nearest_by_primary(&refs, 760.0, 3).len(), 1);
    }

    #[test]
    fn test_equal_distance_prefers_newer() {
        let observations = vec![
            obs(Some(700.0), 10_000, d(1)),
            obs(Some(800.0), 11_000, d(20)),
        ];
        let refs: Vec<&RollerObservation> = observations.iter().collect();
        let nearest = nearest_by_primary(&refs, 750.0, 1);
        assert_eq!(nearest[0].effective_date, d(20), "同距离应取较新观测");
    }

    #[test]
    fn test_missing_primary_excluded() {
        let observations = vec![obs(None, 10_000, d(1)), obs(Some(700.0), 11_000, d(2))];
        let refs: Vec<&RollerObservation> = observations.iter().collect();
        let nearest = nearest_by_primary(&refs, 760.0, 3);
        assert_eq!(nearest.len(), 1, "主属性缺失的观测不参与模糊匹配");
    }
}
