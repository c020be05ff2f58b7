// ==========================================
// 皮带秤维保成本估算系统 - 配置管理器
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 7. 配置项全集
// ==========================================
// 职责: 从 config_kv 表加载估算参数覆写,缺省回退默认值
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::estimation_config::{config_keys, EstimationConfig};
use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};
use tracing::warn;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }
        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入配置值（scope_id='global'，存在则覆盖）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
            ON CONFLICT(scope_id, key) DO UPDATE SET value = excluded.value
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// 读取 f64 覆写值；值缺失或不可解析时回退默认并告警
    fn override_f64(&self, key: &str, default: f64) -> f64 {
        match self.get_config_value(key) {
            Ok(Some(raw)) => match raw.parse::<f64>() {
                Ok(v) => v,
                Err(_) => {
                    warn!(key, raw, "配置值无法解析为数值,回退默认值");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                warn!(key, error = %e, "配置读取失败,回退默认值");
                default
            }
        }
    }

    /// 读取 usize 覆写值；值缺失或不可解析时回退默认并告警
    fn override_usize(&self, key: &str, default: usize) -> usize {
        match self.get_config_value(key) {
            Ok(Some(raw)) => match raw.parse::<usize>() {
                Ok(v) => v,
                Err(_) => {
                    warn!(key, raw, "配置值无法解析为整数,回退默认值");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                warn!(key, error = %e, "配置读取失败,回退默认值");
                default
            }
        }
    }

    /// 加载估算参数全集（默认值 + config_kv 覆写）
    pub fn load_estimation_config(&self) -> EstimationConfig {
        let d = EstimationConfig::default();
        EstimationConfig {
            recency_decay_months: self
                .override_f64(config_keys::RECENCY_DECAY_MONTHS, d.recency_decay_months),
            base_score_exact: self.override_f64(config_keys::BASE_SCORE_EXACT, d.base_score_exact),
            base_score_interpolated: self.override_f64(
                config_keys::BASE_SCORE_INTERPOLATED,
                d.base_score_interpolated,
            ),
            base_score_fuzzy: self.override_f64(config_keys::BASE_SCORE_FUZZY, d.base_score_fuzzy),
            base_score_extrapolated: self.override_f64(
                config_keys::BASE_SCORE_EXTRAPOLATED,
                d.base_score_extrapolated,
            ),
            base_score_default: d.base_score_default,
            count_score_per_point: self.override_f64(
                config_keys::COUNT_SCORE_PER_POINT,
                d.count_score_per_point,
            ),
            count_score_cap: self.override_f64(config_keys::COUNT_SCORE_CAP, d.count_score_cap),
            recency_score_weight: self.override_f64(
                config_keys::RECENCY_SCORE_WEIGHT,
                d.recency_score_weight,
            ),
            length_tolerance_mm: self
                .override_f64(config_keys::LENGTH_TOLERANCE_MM, d.length_tolerance_mm),
            capacity_tolerance: self
                .override_f64(config_keys::CAPACITY_TOLERANCE, d.capacity_tolerance),
            weight_tolerance_kg: self
                .override_f64(config_keys::WEIGHT_TOLERANCE_KG, d.weight_tolerance_kg),
            fuzzy_nearest_n: self.override_usize(config_keys::FUZZY_NEAREST_N, d.fuzzy_nearest_n),
            billet_weight_boundary_kg: self.override_f64(
                config_keys::BILLET_WEIGHT_BOUNDARY_KG,
                d.billet_weight_boundary_kg,
            ),
            matching_summary_limit: self.override_usize(
                config_keys::MATCHING_SUMMARY_LIMIT,
                d.matching_summary_limit,
            ),
        }
    }
}
