// ==========================================
// 皮带秤维保成本估算系统 - 日期范围过滤
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 4.1 日期过滤
// ==========================================
// 语义: Months(N) 保留 [today - N个月, today] 内的观测;
//       All 原样透传(任何年龄的观测都不过滤)
// 空结果合法,由编排器判定"范围内无数据"
// ==========================================

use crate::domain::types::DateRangeWindow;
use crate::engine::record::CostRecord;
use chrono::{Months, NaiveDate};

/// 按日期范围窗口过滤观测，返回引用子集
pub fn filter_by_window<T: CostRecord>(
    observations: &[T],
    window: DateRangeWindow,
    today: NaiveDate,
) -> Vec<&T> {
    match window {
        DateRangeWindow::All => observations.iter().collect(),
        DateRangeWindow::Months(n) => {
            let cutoff = today
                .checked_sub_months(Months::new(n))
                .unwrap_or(NaiveDate::MIN);
            observations
                .iter()
                .filter(|o| o.effective_date() >= cutoff && o.effective_date() <= today)
                .collect()
        }
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::observation::WeighModuleObservation;
    use chrono::Utc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    fn obs(date: NaiveDate) -> WeighModuleObservation {
        WeighModuleObservation {
            observation_id: "OBS".to_string(),
            effective_date: date,
            cost_price: 50_000,
            material_type: None,
            model_id: None,
            idler_spacing_mm: None,
            belt_width_mm: Some(1200.0),
            capacity_kg_per_m: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_months_window_keeps_recent() {
        let observations = vec![
            obs(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()),  // 1个月内
            obs(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()), // 6个月内
            obs(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),  // 超过12个月
        ];

        let kept = filter_by_window(&observations, DateRangeWindow::Months(6), today());
        assert_eq!(kept.len(), 2, "6个月窗口应保留2条");

        let kept = filter_by_window(&observations, DateRangeWindow::Months(3), today());
        assert_eq!(kept.len(), 1, "3个月窗口应保留1条");
    }

    #[test]
    fn test_window_boundary_inclusive() {
        // 正好在窗口边界(today - 6个月)的观测应保留
        let boundary = today().checked_sub_months(Months::new(6)).unwrap();
        let observations = vec![obs(boundary)];
        let kept = filter_by_window(&observations, DateRangeWindow::Months(6), today());
        assert_eq!(kept.len(), 1, "边界日期应含在窗口内");
    }

    #[test]
    fn test_future_dated_excluded_from_months_window() {
        let observations = vec![obs(NaiveDate::from_ymd_opt(2026, 9, 15).unwrap())];
        let kept = filter_by_window(&observations, DateRangeWindow::Months(6), today());
        assert!(kept.is_empty(), "晚于today的观测不在窗口内");
    }

    #[test]
    fn test_all_is_passthrough() {
        // "全部历史"不过滤任何观测,无论多旧
        let observations = vec![
            obs(NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()),
            obs(NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()),
        ];
        let kept = filter_by_window(&observations, DateRangeWindow::All, today());
        assert_eq!(kept.len(), observations.len(), "ALL应原样透传");
    }

    #[test]
    fn test_empty_input_is_valid() {
        let observations: Vec<WeighModuleObservation> = vec![];
        let kept = filter_by_window(&observations, DateRangeWindow::Months(12), today());
        assert!(kept.is_empty());
    }
}
