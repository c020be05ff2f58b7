// ==========================================
// 皮带秤维保成本估算系统 - 演示数据播种
// ==========================================
// 用法: cargo run --bin seed_demo_observations [db_path] [months_back]
// 说明: 重建观测库并写入四个部件族的演示观测,
//       日期沿当前日期向前铺开,便于演示时效加权效果
// ==========================================

use beltscale_cost::domain::observation::{
    BilletWeightObservation, IdlerFrameObservation, RollerObservation, WeighModuleObservation,
};
use beltscale_cost::repository::SqliteObservationRepository;
use chrono::{Local, Months, NaiveDate, Utc};
use std::error::Error;
use std::fs;
use std::path::Path;
use uuid::Uuid;

const DEFAULT_DB_PATH: &str = "beltscale-demo.db";
const DEFAULT_MONTHS_BACK: u32 = 18;

fn main() -> Result<(), Box<dyn Error>> {
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

    let months_back = std::env::args()
        .nth(2)
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_MONTHS_BACK)
        .max(3);

    backup_and_reset_db(&db_path)?;

    let repo = SqliteObservationRepository::new(&db_path)?;
    repo.init_schema()?;

    let base_date = Local::now().date_naive();
    seed_weigh_modules(&repo, base_date, months_back)?;
    seed_idler_frames(&repo, base_date, months_back)?;
    seed_billet_weights(&repo, base_date, months_back)?;
    seed_rollers(&repo, base_date, months_back)?;

    eprintln!("演示观测已写入: {}", db_path);
    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> Result<(), Box<dyn Error>> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("已备份 {} -> {}", db_path, backup_path);
    Ok(())
}

/// 生效日期沿当前日期向前铺开（第i条回退 i*step 个月）
fn spread_date(base: NaiveDate, index: u32, months_back: u32, total: u32) -> NaiveDate {
    let step = (months_back / total.max(1)).max(1);
    base.checked_sub_months(Months::new(index * step))
        .unwrap_or(base)
}

fn seed_weigh_modules(
    repo: &SqliteObservationRepository,
    base_date: NaiveDate,
    months_back: u32,
) -> Result<(), Box<dyn Error>> {
    // (带宽mm, 输送能力kg/m, 价格分)
    let rows: &[(f64, f64, i64)] = &[
        (800.0, 80.0, 42_000),
        (1000.0, 100.0, 50_000),
        (1200.0, 120.0, 62_000),
        (1400.0, 150.0, 70_000),
        (1600.0, 180.0, 82_000),
    ];

    for (i, (width, capacity, cost)) in rows.iter().enumerate() {
        repo.insert_weigh_module(&WeighModuleObservation {
            observation_id: Uuid::new_v4().to_string(),
            effective_date: spread_date(base_date, i as u32, months_back, rows.len() as u32),
            cost_price: *cost,
            material_type: Some("碳钢".to_string()),
            model_id: Some("ICS-30A".to_string()),
            idler_spacing_mm: Some(1000.0),
            belt_width_mm: Some(*width),
            capacity_kg_per_m: Some(*capacity),
            created_at: Utc::now(),
        })?;
    }
    eprintln!("称重模块观测: {} 条", rows.len());
    Ok(())
}

fn seed_idler_frames(
    repo: &SqliteObservationRepository,
    base_date: NaiveDate,
    months_back: u32,
) -> Result<(), Box<dyn Error>> {
    // (带宽mm, 横梁类型, 单价分)
    let rows: &[(f64, &str, i64)] = &[
        (800.0, "槽形", 6_000),
        (1000.0, "槽形", 7_000),
        (1200.0, "槽形", 8_500),
        (1400.0, "槽形", 9_000),
        (1200.0, "平形", 7_800),
    ];

    for (i, (width, transom, cost)) in rows.iter().enumerate() {
        repo.insert_idler_frame(&IdlerFrameObservation {
            observation_id: Uuid::new_v4().to_string(),
            effective_date: spread_date(base_date, i as u32, months_back, rows.len() as u32),
            cost_price: *cost,
            material_type: Some("碳钢".to_string()),
            transom_type: Some(transom.to_string()),
            belt_width_mm: Some(*width),
            capacity_kg_per_m: None,
            quantity: 1,
            created_at: Utc::now(),
        })?;
    }
    eprintln!("托辊架观测: {} 条", rows.len());
    Ok(())
}

fn seed_billet_weights(
    repo: &SqliteObservationRepository,
    base_date: NaiveDate,
    months_back: u32,
) -> Result<(), Box<dyn Error>> {
    // (重量kg, 价格分) —— 轻重类别各铺若干条,覆盖250kg边界两侧
    let rows: &[(f64, i64)] = &[
        (100.0, 20_000),
        (200.0, 28_000),
        (240.0, 30_000),
        (260.0, 60_000),
        (300.0, 66_000),
        (500.0, 90_000),
    ];

    for (i, (weight, cost)) in rows.iter().enumerate() {
        repo.insert_billet_weight(&BilletWeightObservation {
            observation_id: Uuid::new_v4().to_string(),
            effective_date: spread_date(base_date, i as u32, months_back, rows.len() as u32),
            cost_price: *cost,
            material_type: Some("铸铁".to_string()),
            has_cams: Some(false),
            weight_kg: Some(*weight),
            created_at: Utc::now(),
        })?;
    }
    eprintln!("砝码观测: {} 条", rows.len());
    Ok(())
}

fn seed_rollers(
    repo: &SqliteObservationRepository,
    base_date: NaiveDate,
    months_back: u32,
) -> Result<(), Box<dyn Error>> {
    // (辊面长mm, 辊径mm, 单价分)
    let rows: &[(f64, f64, i64)] = &[
        (500.0, 89.0, 8_000),
        (600.0, 89.0, 9_000),
        (750.0, 108.0, 12_000),
        (950.0, 108.0, 14_000),
        (1150.0, 133.0, 18_000),
    ];

    for (i, (face_length, diameter, cost)) in rows.iter().enumerate() {
        repo.insert_roller(&RollerObservation {
            observation_id: Uuid::new_v4().to_string(),
            effective_date: spread_date(base_date, i as u32, months_back, rows.len() as u32),
            cost_price: *cost,
            roller_design: Some("平行辊".to_string()),
            material_type: Some("碳钢".to_string()),
            face_length_mm: Some(*face_length),
            diameter_mm: Some(*diameter),
            quantity: 1,
            created_at: Utc::now(),
        })?;
    }
    eprintln!("托辊观测: {} 条", rows.len());
    Ok(())
}
