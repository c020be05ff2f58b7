// ==========================================
// 估算引擎端到端性质测试
// ==========================================
// 目标: 在内存观测上验证估算管线的整体行为:
//       档位优先级、插值有界性、近邻上限、时效偏好、
//       置信单调性、日期窗口、重量类别隔离、确定性
// ==========================================


use beltscale_cost::config::EstimationConfig;
use beltscale_cost::domain::request::{
    BilletWeightRequest, IdlerFrameRequest, WeighModuleRequest,
};
use beltscale_cost::domain::types::{
    ConfidenceLevel, DateRangeWindow, MatchMethod, WeightCategory,
};
use beltscale_cost::engine::{
    BilletWeightEstimator, EstimationError, IdlerFrameEstimator, WeighModuleEstimator,
};
use chrono::NaiveDate;
use test_helpers::{billet_weight_obs, fixed_today, idler_frame_obs, weigh_module_obs};

fn weigh_request(belt_width: f64, date_range: DateRangeWindow) -> WeighModuleRequest {
    WeighModuleRequest {
        material_type: Some("碳钢".to_string()),
        model_id: Some("ICS-30A".to_string()),
        idler_spacing_mm: Some(1000.0),
        belt_width_mm: belt_width,
        capacity_kg_per_m: None,
        date_range,
    }
}

// ==========================================
// 性质1: 档位优先级 —— 容差内有观测必走精确档
// ==========================================
#[test]
fn test_exact_tier_takes_precedence() {
    let observations = vec![
        weigh_module_obs("WM-1", 1000.0, 50_000),
        weigh_module_obs("WM-2", 1200.0, 62_000),
        weigh_module_obs("WM-3", 1400.0, 70_000),
    ];
    let estimator = WeighModuleEstimator::new(EstimationConfig::default());

    // 1200在容差内存在观测 → 即使插值括号也成立,仍须精确匹配
    let result = estimator
        .estimate(&observations, &weigh_request(1200.0, DateRangeWindow::All), fixed_today())
        .unwrap();
    assert_eq!(result.method, MatchMethod::Exact);
    assert_eq!(result.estimated_cost, 62_000);
}

// ==========================================
// 性质2: 插值有界 —— 估算值落在括号两端价之间
// ==========================================
#[test]
fn test_interpolation_bounded_by_bracket() {
    let observations = vec![
        weigh_module_obs("WM-1", 1000.0, 50_000),
        weigh_module_obs("WM-2", 1400.0, 70_000),
    ];
    let estimator = WeighModuleEstimator::new(EstimationConfig::default());

    for target in [1050.0, 1200.0, 1350.0] {
        let result = estimator
            .estimate(&observations, &weigh_request(target, DateRangeWindow::All), fixed_today())
            .unwrap();
        assert_eq!(result.method, MatchMethod::Interpolated);
        assert!(
            (50_000..=70_000).contains(&result.estimated_cost),
            "目标{}的插值结果{}应落在两端价之间",
            target,
            result.estimated_cost
        );
    }

    // 中点正好取均值
    let mid = estimator
        .estimate(&observations, &weigh_request(1200.0, DateRangeWindow::All), fixed_today())
        .unwrap();
    assert_eq!(mid.estimated_cost, 60_000);
}

// ==========================================
// 性质3: 模糊档最多取3条最近观测
// ==========================================
#[test]
fn test_fuzzy_caps_at_three_nearest() {
    let observations = vec![
        weigh_module_obs("WM-1", 600.0, 40_000),
        weigh_module_obs("WM-2", 800.0, 42_000),
        weigh_module_obs("WM-3", 1000.0, 50_000),
        weigh_module_obs("WM-4", 1200.0, 62_000),
        weigh_module_obs("WM-5", 1400.0, 70_000),
    ];
    let estimator = WeighModuleEstimator::new(EstimationConfig::default());

    // 目标2000在所有观测之上 → 无括号,走模糊档
    let result = estimator
        .estimate(&observations, &weigh_request(2000.0, DateRangeWindow::All), fixed_today())
        .unwrap();
    assert_eq!(result.method, MatchMethod::Fuzzy);
    assert_eq!(result.data_points, 3, "近邻数量上限为3");
    // 最近3条是1400/1200/1000,同日观测等权 → 算术平均四舍五入
    assert_eq!(result.estimated_cost, 60_667);
}

// ==========================================
// 性质4: 时效偏好 —— 加权均值偏向较新观测
// ==========================================
#[test]
fn test_recency_pulls_toward_newer_observation() {
    let mut old = weigh_module_obs("WM-OLD", 1200.0, 40_000);
    old.effective_date = NaiveDate::from_ymd_opt(2024, 8, 30).unwrap(); // 24个月前
    let recent = weigh_module_obs("WM-NEW", 1200.0, 60_000);

    let estimator = WeighModuleEstimator::new(EstimationConfig::default());
    let result = estimator
        .estimate(
            &[old, recent],
            &weigh_request(1200.0, DateRangeWindow::All),
            fixed_today(),
        )
        .unwrap();

    assert_eq!(result.method, MatchMethod::Exact);
    assert!(
        result.estimated_cost > 50_000,
        "加权均值{}应高于算术均值50000,偏向较新的60000",
        result.estimated_cost
    );
}

// ==========================================
// 性质5: 置信单调性 —— 精确≥插值≥模糊;数据越多分越高
// ==========================================
#[test]
fn test_confidence_ordering_across_tiers() {
    let estimator = WeighModuleEstimator::new(EstimationConfig::default());

    // 同一批观测,通过目标位置驱动不同档位
    let observations = vec![
        weigh_module_obs("WM-1", 1000.0, 50_000),
        weigh_module_obs("WM-2", 1400.0, 70_000),
    ];

    let exact = estimator
        .estimate(&observations, &weigh_request(1000.0, DateRangeWindow::All), fixed_today())
        .unwrap();
    let interpolated = estimator
        .estimate(&observations, &weigh_request(1200.0, DateRangeWindow::All), fixed_today())
        .unwrap();
    let fuzzy = estimator
        .estimate(&observations, &weigh_request(2000.0, DateRangeWindow::All), fixed_today())
        .unwrap();

    assert_eq!(exact.method, MatchMethod::Exact);
    assert_eq!(interpolated.method, MatchMethod::Interpolated);
    assert_eq!(fuzzy.method, MatchMethod::Fuzzy);
    assert!(exact.confidence.score > interpolated.confidence.score);
    assert!(interpolated.confidence.score > fuzzy.confidence.score);
}

#[test]
fn test_confidence_grows_with_data_points() {
    let estimator = WeighModuleEstimator::new(EstimationConfig::default());

    let few = vec![weigh_module_obs("WM-1", 1200.0, 62_000)];
    let many: Vec<_> = (0..5)
        .map(|i| weigh_module_obs(&format!("WM-{}", i), 1200.0, 62_000))
        .collect();

    let r_few = estimator
        .estimate(&few, &weigh_request(1200.0, DateRangeWindow::All), fixed_today())
        .unwrap();
    let r_many = estimator
        .estimate(&many, &weigh_request(1200.0, DateRangeWindow::All), fixed_today())
        .unwrap();

    assert!(r_many.confidence.score > r_few.confidence.score);
    // 5条同日精确匹配: 50 + 30 + 20 = 100 → High
    assert_eq!(r_many.confidence.level, ConfidenceLevel::High);
    assert_eq!(r_many.confidence.score, 100);
}

// ==========================================
// 性质6: 日期窗口 —— 窗口外观测不参与估算
// ==========================================
#[test]
fn test_date_window_excludes_old_observations() {
    let mut old = weigh_module_obs("WM-OLD", 1200.0, 40_000);
    old.effective_date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let observations = vec![old];

    let estimator = WeighModuleEstimator::new(EstimationConfig::default());

    // 近6个月窗口内无数据 → NO_DATA_IN_RANGE
    let err = estimator
        .estimate(
            &observations,
            &weigh_request(1200.0, DateRangeWindow::Months(6)),
            fixed_today(),
        )
        .unwrap_err();
    assert!(matches!(err, EstimationError::NoDataInRange));

    // 全部历史则可命中
    let result = estimator
        .estimate(&observations, &weigh_request(1200.0, DateRangeWindow::All), fixed_today())
        .unwrap();
    assert_eq!(result.estimated_cost, 40_000);
}

// ==========================================
// 性质7: 重量类别隔离 —— 250kg边界两侧互不取点
// ==========================================
#[test]
fn test_billet_weight_categories_are_isolated() {
    let observations = vec![
        billet_weight_obs("BW-1", 100.0, 20_000),
        billet_weight_obs("BW-2", 240.0, 30_000),
        billet_weight_obs("BW-3", 260.0, 60_000),
        billet_weight_obs("BW-4", 500.0, 90_000),
    ];
    let estimator = BilletWeightEstimator::new(EstimationConfig::default());

    let light = estimator
        .estimate(
            &observations,
            &BilletWeightRequest {
                material_type: Some("铸铁".to_string()),
                has_cams: Some(false),
                weight_kg: 170.0,
                date_range: DateRangeWindow::All,
            },
            fixed_today(),
        )
        .unwrap();
    assert_eq!(light.category, WeightCategory::Light);
    // 轻型类别内插值: 20000 + (30000-20000)*(170-100)/(240-100) = 25000
    assert_eq!(light.method, MatchMethod::Interpolated);
    assert_eq!(light.estimated_cost, 25_000);

    let heavy = estimator
        .estimate(
            &observations,
            &BilletWeightRequest {
                material_type: Some("铸铁".to_string()),
                has_cams: Some(false),
                weight_kg: 380.0,
                date_range: DateRangeWindow::All,
            },
            fixed_today(),
        )
        .unwrap();
    assert_eq!(heavy.category, WeightCategory::Heavy);
    // 重型类别内插值: 60000 + (90000-60000)*(380-260)/(500-260) = 75000
    assert_eq!(heavy.estimated_cost, 75_000);
}

// ==========================================
// 性质8: 确定性 —— 同一输入反复估算结果一致
// ==========================================
#[test]
fn test_estimation_is_deterministic() {
    let observations = vec![
        idler_frame_obs("IF-1", 1000.0, 7_000),
        idler_frame_obs("IF-2", 1400.0, 9_000),
    ];
    let estimator = IdlerFrameEstimator::new(EstimationConfig::default());
    let request = IdlerFrameRequest {
        material_type: Some("碳钢".to_string()),
        transom_type: Some("槽形".to_string()),
        belt_width_mm: 1200.0,
        capacity_kg_per_m: None,
        quantity: 3,
        date_range: DateRangeWindow::All,
    };

    let first = estimator.estimate(&observations, &request, fixed_today()).unwrap();
    for _ in 0..10 {
        let again = estimator.estimate(&observations, &request, fixed_today()).unwrap();
        assert_eq!(again.estimated_cost_per_unit, first.estimated_cost_per_unit);
        assert_eq!(again.estimated_cost_total, first.estimated_cost_total);
        assert_eq!(again.confidence.score, first.confidence.score);
        assert_eq!(again.method, first.method);
    }
}
