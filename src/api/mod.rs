// ==========================================
// 皮带秤维保成本估算系统 - API层
// ==========================================
// 职责: 对外门面,组合仓储读取与引擎估算,
//       输出 success 判别的响应对象
// 说明: 仓储/引擎错误在门面边界统一折叠进响应,
//       不设独立的API错误类型
// ==========================================

pub mod estimation_api;

pub use estimation_api::{EstimationApi, EstimationResponse};
