// ==========================================
// 皮带秤维保成本估算系统 - 领域模型层
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 3. 数据模型
// ==========================================
// 职责: 定义观测实体、请求/结果对象、领域类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod estimate;
pub mod observation;
pub mod request;
pub mod types;

// 重导出核心类型
pub use estimate::{
    BilletWeightEstimate, Confidence, IdlerFrameEstimate, RollerEstimate, WeighModuleEstimate,
};
pub use observation::{
    BilletWeightObservation, IdlerFrameObservation, ObservationSummary, RollerObservation,
    WeighModuleObservation,
};
pub use request::{BilletWeightRequest, IdlerFrameRequest, RollerRequest, WeighModuleRequest};
pub use types::{
    ComponentFamily, ConfidenceLevel, DateRangeWindow, MatchMethod, WeightCategory,
};
