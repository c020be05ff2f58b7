// ==========================================
// 皮带秤维保成本估算系统 - 核心库
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 系统宪法
// 技术栈: Rust + SQLite
// 系统定位: 决策支持系统 (估算结果供人工参考)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    ComponentFamily, ConfidenceLevel, DateRangeWindow, MatchMethod, WeightCategory,
};

// 领域实体
pub use domain::{
    BilletWeightEstimate, BilletWeightObservation, BilletWeightRequest, Confidence,
    IdlerFrameEstimate, IdlerFrameObservation, IdlerFrameRequest, ObservationSummary,
    RollerEstimate, RollerObservation, RollerRequest, WeighModuleEstimate, WeighModuleObservation,
    WeighModuleRequest,
};

// 配置
pub use config::EstimationConfig;

// 引擎
pub use engine::{
    BilletWeightEstimator, EstimationError, EstimationResult, IdlerFrameEstimator,
    RollerEstimator, WeighModuleEstimator,
};

// 仓储
pub use repository::{ObservationReader, SqliteObservationRepository};

// API
pub use api::{EstimationApi, EstimationResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "皮带秤维保成本估算系统";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";

// ==========================================
// 预编译检查
// ==========================================
