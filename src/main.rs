// ==========================================
// 皮带秤维保成本估算系统 - 主入口
// ==========================================
// 依据: Estimation_Engine_Design_v1.md
// 技术栈: Rust + SQLite
// 系统定位: 决策支持系统
// ==========================================

use beltscale_cost::config::ConfigManager;
use beltscale_cost::domain::request::{
    BilletWeightRequest, IdlerFrameRequest, RollerRequest, WeighModuleRequest,
};
use beltscale_cost::domain::types::DateRangeWindow;
use beltscale_cost::repository::SqliteObservationRepository;
use beltscale_cost::{logging, EstimationApi};
use std::sync::Arc;
use tracing::info;

/// 默认数据库路径（用户数据目录下）
fn get_default_db_path() -> String {
    let base = dirs::data_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    let dir = base.join("beltscale-cost");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("无法创建数据目录 {}: {}", dir.display(), e);
    }
    dir.join("beltscale.db").to_string_lossy().to_string()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    info!("==================================================");
    info!("{} - 决策支持系统", beltscale_cost::APP_NAME);
    info!("系统版本: {}", beltscale_cost::VERSION);
    info!("==================================================");

    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);
    info!("使用数据库: {}", db_path);

    let repo = SqliteObservationRepository::new(&db_path)?;
    repo.init_schema()?;

    // 估算参数: 内置默认 + config_kv 覆写
    let config_manager = ConfigManager::new(&db_path)?;
    let config = config_manager.load_estimation_config();

    let api = EstimationApi::new(Arc::new(repo), config);

    // 每个部件族跑一条示例请求,结果以JSON输出
    let weigh = api
        .estimate_weigh_module(&WeighModuleRequest {
            material_type: Some("碳钢".to_string()),
            model_id: None,
            idler_spacing_mm: None,
            belt_width_mm: 1200.0,
            capacity_kg_per_m: None,
            date_range: DateRangeWindow::Months(6),
        })
        .await;
    println!("称重模块: {}", serde_json::to_string_pretty(&weigh)?);

    let idler = api
        .estimate_idler_frame(&IdlerFrameRequest {
            material_type: Some("碳钢".to_string()),
            transom_type: Some("槽形".to_string()),
            belt_width_mm: 1200.0,
            capacity_kg_per_m: None,
            quantity: 4,
            date_range: DateRangeWindow::Months(12),
        })
        .await;
    println!("托辊架: {}", serde_json::to_string_pretty(&idler)?);

    let billet = api
        .estimate_billet_weight(&BilletWeightRequest {
            material_type: Some("铸铁".to_string()),
            has_cams: Some(false),
            weight_kg: 200.0,
            date_range: DateRangeWindow::All,
        })
        .await;
    println!("砝码: {}", serde_json::to_string_pretty(&billet)?);

    let roller = api
        .estimate_roller(&RollerRequest {
            roller_design: Some("平行辊".to_string()),
            material_type: Some("碳钢".to_string()),
            face_length_mm: 750.0,
            diameter_mm: Some(108.0),
            quantity: 8,
            date_range: DateRangeWindow::All,
        })
        .await;
    println!("托辊: {}", serde_json::to_string_pretty(&roller)?);

    Ok(())
}
