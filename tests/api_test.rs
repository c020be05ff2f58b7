// ==========================================
// 估算API门面端到端测试
// ==========================================
// 目标: 仓储写入 → 门面估算 → 响应对象,全链路验证
// ==========================================


use beltscale_cost::config::EstimationConfig;
use beltscale_cost::domain::request::{
    BilletWeightRequest, IdlerFrameRequest, RollerRequest, WeighModuleRequest,
};
use beltscale_cost::domain::types::{DateRangeWindow, WeightCategory};
use beltscale_cost::EstimationApi;
use std::sync::Arc;
use test_helpers::{
    billet_weight_obs, create_test_repo, fixed_today, idler_frame_obs, roller_obs,
    weigh_module_obs,
};

#[tokio::test]
async fn test_weigh_module_end_to_end() {
    let (_tmp, repo) = create_test_repo().expect("创建测试数据库失败");
    repo.insert_weigh_module(&weigh_module_obs("WM-1", 1000.0, 50_000)).unwrap();
    repo.insert_weigh_module(&weigh_module_obs("WM-2", 1400.0, 70_000)).unwrap();

    let api = EstimationApi::new(Arc::new(repo), EstimationConfig::default());
    let resp = api
        .estimate_weigh_module_at(
            &WeighModuleRequest {
                material_type: Some("碳钢".to_string()),
                model_id: None,
                idler_spacing_mm: None,
                belt_width_mm: 1200.0,
                capacity_kg_per_m: None,
                date_range: DateRangeWindow::All,
            },
            fixed_today(),
        )
        .await;

    assert!(resp.success, "估算应成功: {:?}", resp.error);
    assert_eq!(resp.estimated_cost, Some(60_000));
    assert_eq!(resp.method.as_deref(), Some("线性插值"));
    assert_eq!(resp.data_points, Some(2));
    let entries = resp.matching_entries.expect("应携带估算依据");
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn test_idler_frame_quantity_in_response() {
    let (_tmp, repo) = create_test_repo().expect("创建测试数据库失败");
    repo.insert_idler_frame(&idler_frame_obs("IF-1", 1200.0, 8_500)).unwrap();

    let api = EstimationApi::new(Arc::new(repo), EstimationConfig::default());
    let resp = api
        .estimate_idler_frame_at(
            &IdlerFrameRequest {
                material_type: Some("碳钢".to_string()),
                transom_type: Some("槽形".to_string()),
                belt_width_mm: 1200.0,
                capacity_kg_per_m: None,
                quantity: 4,
                date_range: DateRangeWindow::All,
            },
            fixed_today(),
        )
        .await;

    assert!(resp.success);
    assert_eq!(resp.estimated_cost_per_unit, Some(8_500));
    assert_eq!(resp.estimated_cost_total, Some(34_000));
    assert_eq!(resp.quantity, Some(4));
    assert_eq!(resp.estimated_cost, Some(34_000), "estimated_cost应等于总价");
}

#[tokio::test]
async fn test_billet_weight_category_in_response() {
    let (_tmp, repo) = create_test_repo().expect("创建测试数据库失败");
    repo.insert_billet_weight(&billet_weight_obs("BW-1", 260.0, 60_000)).unwrap();
    repo.insert_billet_weight(&billet_weight_obs("BW-2", 300.0, 66_000)).unwrap();

    let api = EstimationApi::new(Arc::new(repo), EstimationConfig::default());
    let resp = api
        .estimate_billet_weight_at(
            &BilletWeightRequest {
                material_type: Some("铸铁".to_string()),
                has_cams: Some(false),
                weight_kg: 280.0,
                date_range: DateRangeWindow::All,
            },
            fixed_today(),
        )
        .await;

    assert!(resp.success);
    assert_eq!(resp.category, Some(WeightCategory::Heavy));
    assert_eq!(resp.estimated_cost, Some(63_000));
}

#[tokio::test]
async fn test_roller_no_matching_configuration() {
    let (_tmp, repo) = create_test_repo().expect("创建测试数据库失败");
    repo.insert_roller(&roller_obs("RL-1", 750.0, 108.0, 12_000)).unwrap();

    let api = EstimationApi::new(Arc::new(repo), EstimationConfig::default());
    let resp = api
        .estimate_roller_at(
            &RollerRequest {
                roller_design: Some("梯形辊".to_string()),
                material_type: Some("碳钢".to_string()),
                face_length_mm: 750.0,
                diameter_mm: None,
                quantity: 2,
                date_range: DateRangeWindow::All,
            },
            fixed_today(),
        )
        .await;

    assert!(!resp.success);
    assert_eq!(resp.error_code.as_deref(), Some("NO_MATCHING_CONFIGURATION"));
    assert_eq!(resp.error.as_deref(), Some("无匹配的产品配置"));
}

#[tokio::test]
async fn test_response_serializes_without_null_noise() {
    let (_tmp, repo) = create_test_repo().expect("创建测试数据库失败");
    repo.insert_weigh_module(&weigh_module_obs("WM-1", 1200.0, 62_000)).unwrap();

    let api = EstimationApi::new(Arc::new(repo), EstimationConfig::default());
    let resp = api
        .estimate_weigh_module_at(
            &WeighModuleRequest {
                material_type: None,
                model_id: None,
                idler_spacing_mm: None,
                belt_width_mm: 1200.0,
                capacity_kg_per_m: None,
                date_range: DateRangeWindow::All,
            },
            fixed_today(),
        )
        .await;

    let json = serde_json::to_value(&resp).unwrap();
    assert_eq!(json["success"], true);
    // 失败分支字段与他族扩展字段在成功响应中不应出现
    assert!(json.get("error").is_none());
    assert!(json.get("quantity").is_none());
    assert!(json.get("category").is_none());
}
