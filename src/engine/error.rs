// ==========================================
// 皮带秤维保成本估算系统 - 估算错误类型
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 8. 错误分类
// ==========================================
// 说明: 四类失败全部在编排器边界就地回收,
//       以类型化 Result 返回,不向调用方抛异常;
//       失败后不重试,由调用方调整参数重新发起请求
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 估算失败分类
#[derive(Error, Debug)]
pub enum EstimationError {
    /// 日期过滤后为空
    #[error("所选日期范围内无历史数据")]
    NoDataInRange,

    /// 类别属性精确过滤后为空(类别不匹配=不可比,不降级模糊匹配)
    #[error("无匹配的产品配置")]
    NoMatchingConfiguration,

    /// 类别匹配非空但无可用的连续属性匹配/括号/模糊集
    /// (仅当匹配到的观测主连续属性缺失时出现)
    #[error("有效数据不足,无法估算")]
    InsufficientData,

    /// 观测数据读取失败或计算中的意外错误
    #[error("历史数据读取失败: {0}")]
    DataUnavailable(String),
}

impl EstimationError {
    /// 错误代码（返回给前端）
    pub fn code(&self) -> &'static str {
        match self {
            EstimationError::NoDataInRange => "NO_DATA_IN_RANGE",
            EstimationError::NoMatchingConfiguration => "NO_MATCHING_CONFIGURATION",
            EstimationError::InsufficientData => "INSUFFICIENT_DATA",
            EstimationError::DataUnavailable(_) => "DATA_UNAVAILABLE",
        }
    }
}

impl From<RepositoryError> for EstimationError {
    fn from(err: RepositoryError) -> Self {
        EstimationError::DataUnavailable(err.to_string())
    }
}

/// Result 类型别名
pub type EstimationResult<T> = Result<T, EstimationError>;
