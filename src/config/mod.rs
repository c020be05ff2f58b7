// ==========================================
// 皮带秤维保成本估算系统 - 配置层
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 7. 配置项全集
// ==========================================
// 职责: 估算参数管理,经验常数可覆写不重推
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod estimation_config;

// 重导出核心配置类型
pub use config_manager::ConfigManager;
pub use estimation_config::{config_keys, EstimationConfig};
