// ==========================================
// 皮带秤维保成本估算系统 - 成本观测仓储
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 4. 数据访问接口
// 红线: Repository 不含业务逻辑,只负责数据访问
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================
// 说明: ObservationReader 是注入估算编排器的数据访问接口,
//       引擎逻辑对"观测从哪来"不做任何假设,
//       便于用内存数据离线测试匹配/评分逻辑
// ==========================================

use crate::domain::observation::{
    BilletWeightObservation, IdlerFrameObservation, RollerObservation, WeighModuleObservation,
};
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// ObservationReader - 观测读取接口
// ==========================================
/// 观测数据读取接口（按部件族整表读取）
///
/// 每次估算请求只发生一次数据读取，之后的过滤/匹配/评分
/// 全部在本地快照上同步完成。
#[async_trait]
pub trait ObservationReader: Send + Sync {
    /// 读取全部称重模块观测
    async fn weigh_module_observations(&self) -> RepositoryResult<Vec<WeighModuleObservation>>;

    /// 读取全部托辊架观测
    async fn idler_frame_observations(&self) -> RepositoryResult<Vec<IdlerFrameObservation>>;

    /// 读取全部砝码观测
    async fn billet_weight_observations(&self) -> RepositoryResult<Vec<BilletWeightObservation>>;

    /// 读取全部托辊观测
    async fn roller_observations(&self) -> RepositoryResult<Vec<RollerObservation>>;
}

// ==========================================
// SqliteObservationRepository - SQLite 观测仓储
// ==========================================
/// SQLite 观测仓储
/// 职责: 管理四张 cost_observation_* 表的写入与整表读取
pub struct SqliteObservationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteObservationRepository {
    /// 创建新的仓储实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 初始化观测表与配置表（幂等）
    pub fn init_schema(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cost_observation_weigh_module (
                observation_id    TEXT PRIMARY KEY,
                effective_date    TEXT NOT NULL,
                cost_price        INTEGER NOT NULL,
                material_type     TEXT,
                model_id          TEXT,
                idler_spacing_mm  REAL,
                belt_width_mm     REAL,
                capacity_kg_per_m REAL,
                created_at        TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS cost_observation_idler_frame (
                observation_id    TEXT PRIMARY KEY,
                effective_date    TEXT NOT NULL,
                cost_price        INTEGER NOT NULL,
                material_type     TEXT,
                transom_type      TEXT,
                belt_width_mm     REAL,
                capacity_kg_per_m REAL,
                quantity          INTEGER NOT NULL DEFAULT 1,
                created_at        TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS cost_observation_billet_weight (
                observation_id    TEXT PRIMARY KEY,
                effective_date    TEXT NOT NULL,
                cost_price        INTEGER NOT NULL,
                material_type     TEXT,
                has_cams          INTEGER,
                weight_kg         REAL,
                created_at        TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS cost_observation_roller (
                observation_id    TEXT PRIMARY KEY,
                effective_date    TEXT NOT NULL,
                cost_price        INTEGER NOT NULL,
                roller_design     TEXT,
                material_type     TEXT,
                face_length_mm    REAL,
                diameter_mm       REAL,
                quantity          INTEGER NOT NULL DEFAULT 1,
                created_at        TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS config_kv (
                scope_id TEXT NOT NULL,
                key      TEXT NOT NULL,
                value    TEXT NOT NULL,
                PRIMARY KEY (scope_id, key)
            );
            "#,
        )?;
        Ok(())
    }

    // ==========================================
    // 写入接口（观测一经录入不可变,仅提供 insert）
    // ==========================================

    /// 写入称重模块观测
    pub fn insert_weigh_module(&self, obs: &WeighModuleObservation) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO cost_observation_weigh_module (
                observation_id, effective_date, cost_price,
                material_type, model_id, idler_spacing_mm,
                belt_width_mm, capacity_kg_per_m, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                obs.observation_id,
                obs.effective_date.to_string(),
                obs.cost_price,
                obs.material_type,
                obs.model_id,
                obs.idler_spacing_mm,
                obs.belt_width_mm,
                obs.capacity_kg_per_m,
                obs.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// 写入托辊架观测
    pub fn insert_idler_frame(&self, obs: &IdlerFrameObservation) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO cost_observation_idler_frame (
                observation_id, effective_date, cost_price,
                material_type, transom_type,
                belt_width_mm, capacity_kg_per_m, quantity, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                obs.observation_id,
                obs.effective_date.to_string(),
                obs.cost_price,
                obs.material_type,
                obs.transom_type,
                obs.belt_width_mm,
                obs.capacity_kg_per_m,
                obs.quantity,
                obs.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// 写入砝码观测
    pub fn insert_billet_weight(&self, obs: &BilletWeightObservation) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO cost_observation_billet_weight (
                observation_id, effective_date, cost_price,
                material_type, has_cams, weight_kg, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                obs.observation_id,
                obs.effective_date.to_string(),
                obs.cost_price,
                obs.material_type,
                obs.has_cams.map(|b| if b { 1 } else { 0 }),
                obs.weight_kg,
                obs.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// 写入托辊观测
    pub fn insert_roller(&self, obs: &RollerObservation) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO cost_observation_roller (
                observation_id, effective_date, cost_price,
                roller_design, material_type,
                face_length_mm, diameter_mm, quantity, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                obs.observation_id,
                obs.effective_date.to_string(),
                obs.cost_price,
                obs.roller_design,
                obs.material_type,
                obs.face_length_mm,
                obs.diameter_mm,
                obs.quantity,
                obs.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    // ==========================================
    // 同步读取（内部实现,供 async trait 包装）
    // ==========================================

    fn fetch_weigh_modules(&self) -> RepositoryResult<Vec<WeighModuleObservation>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT observation_id, effective_date, cost_price,
                   material_type, model_id, idler_spacing_mm,
                   belt_width_mm, capacity_kg_per_m, created_at
            FROM cost_observation_weigh_module
            ORDER BY effective_date DESC
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(WeighModuleObservation {
                observation_id: row.get(0)?,
                effective_date: parse_date(row, 1)?,
                cost_price: row.get(2)?,
                material_type: row.get(3)?,
                model_id: row.get(4)?,
                idler_spacing_mm: row.get(5)?,
                belt_width_mm: row.get(6)?,
                capacity_kg_per_m: row.get(7)?,
                created_at: parse_timestamp(row, 8)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn fetch_idler_frames(&self) -> RepositoryResult<Vec<IdlerFrameObservation>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT observation_id, effective_date, cost_price,
                   material_type, transom_type,
                   belt_width_mm, capacity_kg_per_m, quantity, created_at
            FROM cost_observation_idler_frame
            ORDER BY effective_date DESC
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(IdlerFrameObservation {
                observation_id: row.get(0)?,
                effective_date: parse_date(row, 1)?,
                cost_price: row.get(2)?,
                material_type: row.get(3)?,
                transom_type: row.get(4)?,
                belt_width_mm: row.get(5)?,
                capacity_kg_per_m: row.get(6)?,
                quantity: row.get(7)?,
                created_at: parse_timestamp(row, 8)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn fetch_billet_weights(&self) -> RepositoryResult<Vec<BilletWeightObservation>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT observation_id, effective_date, cost_price,
                   material_type, has_cams, weight_kg, created_at
            FROM cost_observation_billet_weight
            ORDER BY effective_date DESC
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(BilletWeightObservation {
                observation_id: row.get(0)?,
                effective_date: parse_date(row, 1)?,
                cost_price: row.get(2)?,
                material_type: row.get(3)?,
                has_cams: row.get::<_, Option<i64>>(4)?.map(|v| v != 0),
                weight_kg: row.get(5)?,
                created_at: parse_timestamp(row, 6)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn fetch_rollers(&self) -> RepositoryResult<Vec<RollerObservation>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT observation_id, effective_date, cost_price,
                   roller_design, material_type,
                   face_length_mm, diameter_mm, quantity, created_at
            FROM cost_observation_roller
            ORDER BY effective_date DESC
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(RollerObservation {
                observation_id: row.get(0)?,
                effective_date: parse_date(row, 1)?,
                cost_price: row.get(2)?,
                roller_design: row.get(3)?,
                material_type: row.get(4)?,
                face_length_mm: row.get(5)?,
                diameter_mm: row.get(6)?,
                quantity: row.get(7)?,
                created_at: parse_timestamp(row, 8)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[async_trait]
impl ObservationReader for SqliteObservationRepository {
    async fn weigh_module_observations(&self) -> RepositoryResult<Vec<WeighModuleObservation>> {
        self.fetch_weigh_modules()
    }

    async fn idler_frame_observations(&self) -> RepositoryResult<Vec<IdlerFrameObservation>> {
        self.fetch_idler_frames()
    }

    async fn billet_weight_observations(&self) -> RepositoryResult<Vec<BilletWeightObservation>> {
        self.fetch_billet_weights()
    }

    async fn roller_observations(&self) -> RepositoryResult<Vec<RollerObservation>> {
        self.fetch_rollers()
    }
}

// ==========================================
// 行解析辅助
// ==========================================

/// 解析日期列（格式 YYYY-MM-DD，解析失败回退 1970-01-01）
fn parse_date(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    Ok(NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .unwrap_or_else(|_| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()))
}

/// 解析时间戳列（RFC3339，解析失败回退当前时间）
fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    Ok(DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now()))
}
