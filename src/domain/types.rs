// ==========================================
// 皮带秤维保成本估算系统 - 领域类型定义
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 2. 部件族与匹配层级
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 部件族 (Component Family)
// ==========================================
// 红线: 观测记录只属于一个部件族,跨族匹配永不发生
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentFamily {
    WeighModule,  // 称重模块
    IdlerFrame,   // 托辊架
    BilletWeight, // 砝码
    Roller,       // 托辊
}

impl fmt::Display for ComponentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentFamily::WeighModule => write!(f, "WEIGH_MODULE"),
            ComponentFamily::IdlerFrame => write!(f, "IDLER_FRAME"),
            ComponentFamily::BilletWeight => write!(f, "BILLET_WEIGHT"),
            ComponentFamily::Roller => write!(f, "ROLLER"),
        }
    }
}

impl ComponentFamily {
    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ComponentFamily::WeighModule => "WEIGH_MODULE",
            ComponentFamily::IdlerFrame => "IDLER_FRAME",
            ComponentFamily::BilletWeight => "BILLET_WEIGHT",
            ComponentFamily::Roller => "ROLLER",
        }
    }
}

// ==========================================
// 匹配方式 (Match Method)
// ==========================================
// 层级递降: Exact > Interpolated > Fuzzy > Extrapolated
// 红线: 类别属性不匹配 = 不可比,不降级为模糊匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchMethod {
    Exact,        // 精确匹配(连续属性在容差内)
    Interpolated, // 两点线性插值
    Fuzzy,        // 近邻加权(最近N条)
    Extrapolated, // 外推(仅保留评分档位,当前流程不产生)
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMethod::Exact => write!(f, "EXACT"),
            MatchMethod::Interpolated => write!(f, "INTERPOLATED"),
            MatchMethod::Fuzzy => write!(f, "FUZZY"),
            MatchMethod::Extrapolated => write!(f, "EXTRAPOLATED"),
        }
    }
}

impl MatchMethod {
    /// 前端展示用标签
    pub fn label(&self) -> &'static str {
        match self {
            MatchMethod::Exact => "精确匹配",
            MatchMethod::Interpolated => "线性插值",
            MatchMethod::Fuzzy => "近邻加权",
            MatchMethod::Extrapolated => "外推估算",
        }
    }
}

// ==========================================
// 置信等级 (Confidence Level)
// ==========================================
// 依据: Estimation_Engine_Design_v1.md - 5. 置信评分
// 说明: 启发式评分档位,不是统计置信区间
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    VeryLow, // 极低 (<50)
    Low,     // 低 (>=50)
    Medium,  // 中 (>=70)
    High,    // 高 (>=90)
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceLevel::VeryLow => write!(f, "VERY_LOW"),
            ConfidenceLevel::Low => write!(f, "LOW"),
            ConfidenceLevel::Medium => write!(f, "MEDIUM"),
            ConfidenceLevel::High => write!(f, "HIGH"),
        }
    }
}

impl ConfidenceLevel {
    /// 按分数划分档位（边界含于高档位: >=90 高, >=70 中, >=50 低）
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            ConfidenceLevel::High
        } else if score >= 70.0 {
            ConfidenceLevel::Medium
        } else if score >= 50.0 {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::VeryLow
        }
    }

    /// 前端展示用颜色标签
    pub fn color(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "green",
            ConfidenceLevel::Medium => "yellow",
            ConfidenceLevel::Low => "orange",
            ConfidenceLevel::VeryLow => "red",
        }
    }

    /// 前端展示用标签
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "高",
            ConfidenceLevel::Medium => "中",
            ConfidenceLevel::Low => "低",
            ConfidenceLevel::VeryLow => "极低",
        }
    }
}

// ==========================================
// 日期范围窗口 (Date Range Window)
// ==========================================
// 取值: 近3/6/12/24个月,或全部历史("ALL")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateRangeWindow {
    Months(u32), // 近N个月
    All,         // 全部历史(不过滤)
}

impl DateRangeWindow {
    /// 前端展示用描述
    pub fn label(&self) -> String {
        match self {
            DateRangeWindow::Months(n) => format!("近{}个月", n),
            DateRangeWindow::All => "全部历史".to_string(),
        }
    }
}

impl fmt::Display for DateRangeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRangeWindow::Months(n) => write!(f, "{}M", n),
            DateRangeWindow::All => write!(f, "ALL"),
        }
    }
}

// ==========================================
// 砝码重量类别 (Billet Weight Category)
// ==========================================
// 红线: 成本模型在类别边界处不连续,插值/模糊匹配永不跨类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightCategory {
    Light, // 轻型(低于边界)
    Heavy, // 重型(不低于边界)
}

impl WeightCategory {
    /// 按重量与边界值划分类别（边界值归入重型）
    pub fn from_weight(weight_kg: f64, boundary_kg: f64) -> Self {
        if weight_kg < boundary_kg {
            WeightCategory::Light
        } else {
            WeightCategory::Heavy
        }
    }

    /// 转换为数据库/前端字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WeightCategory::Light => "LIGHT",
            WeightCategory::Heavy => "HEAVY",
        }
    }
}

impl fmt::Display for WeightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}
