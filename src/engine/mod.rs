// ==========================================
// 皮带秤维保成本估算系统 - 引擎层
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 4. 引擎体系
// ==========================================
// 职责: 实现匹配/插值/加权/评分业务规则,不拼 SQL
// 红线: Engine 不做数据访问,观测快照由调用方注入;
//       每次估算是纯函数管线,无跨请求状态
// ==========================================

pub mod billet_weight;
pub mod confidence;
pub mod date_filter;
pub mod error;
pub mod fuzzy;
pub mod idler_frame;
pub mod interpolator;
pub mod matcher;
pub mod recency;
pub mod record;
pub mod roller;
pub mod weigh_module;

// 重导出核心引擎
pub use billet_weight::BilletWeightEstimator;
pub use confidence::ConfidenceScorer;
pub use error::{EstimationError, EstimationResult};
pub use idler_frame::IdlerFrameEstimator;
pub use recency::RecencyWeighter;
pub use record::CostRecord;
pub use roller::RollerEstimator;
pub use weigh_module::WeighModuleEstimator;
