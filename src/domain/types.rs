// ==========================================
// 供应商质量管理门户 - 领域类型定义
// ==========================================
// 职责: 供应商分类、月份键、PPM 目标判定等基础类型
// 红线: 月份按时间顺序比较,不按显示标签字典序比较
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 供应商分类 (Supplier Category)
// ==========================================
// 同类供应商组成一个排名池,每类有独立的 PPM 目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SupplierCategory {
    #[serde(rename = "Pre-Machining")]
    PreMachining, // 粗加工件
    #[serde(rename = "Child-Part")]
    ChildPart, // 子零件
}

impl SupplierCategory {
    /// 全部分类 (固定顺序)
    pub const ALL: [SupplierCategory; 2] = [SupplierCategory::PreMachining, SupplierCategory::ChildPart];

    /// 从字符串解析分类
    ///
    /// 兼容显示名 (Pre-Machining) 与库存储名 (PRE_MACHINING)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "PRE_MACHINING" => Some(SupplierCategory::PreMachining),
            "CHILD_PART" => Some(SupplierCategory::ChildPart),
            _ => None,
        }
    }

    /// 转换为数据库存储字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SupplierCategory::PreMachining => "PRE_MACHINING",
            SupplierCategory::ChildPart => "CHILD_PART",
        }
    }
}

impl fmt::Display for SupplierCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupplierCategory::PreMachining => write!(f, "Pre-Machining"),
            SupplierCategory::ChildPart => write!(f, "Child-Part"),
        }
    }
}

// ==========================================
// 供应商账号状态 (Supplier Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplierStatus {
    Active,            // 正常
    PendingActivation, // 待激活
    Inactive,          // 停用
}

impl SupplierStatus {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().replace(' ', "_").as_str() {
            "PENDING_ACTIVATION" => SupplierStatus::PendingActivation,
            "INACTIVE" => SupplierStatus::Inactive,
            _ => SupplierStatus::Active, // 默认值
        }
    }
}

impl fmt::Display for SupplierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupplierStatus::Active => write!(f, "ACTIVE"),
            SupplierStatus::PendingActivation => write!(f, "PENDING_ACTIVATION"),
            SupplierStatus::Inactive => write!(f, "INACTIVE"),
        }
    }
}

// ==========================================
// 月份键 (Month Key)
// ==========================================
// 字段顺序 (year, month) 决定派生 Ord 即时间顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    const MONTH_ABBR: [&'static str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// 取日期所在的自然月
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// 解析 "YYYY-MM"
    pub fn parse(s: &str) -> Option<Self> {
        let (y, m) = s.trim().split_once('-')?;
        let year = y.parse::<i32>().ok()?;
        let month = m.parse::<u32>().ok()?;
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// 报表显示标签,例如 "Oct 2025"
    pub fn label(&self) -> String {
        let idx = (self.month.clamp(1, 12) - 1) as usize;
        format!("{} {}", Self::MONTH_ABBR[idx], self.year)
    }

    /// 月份是否包含该日期
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ==========================================
// PPM 目标判定 (PPM Status)
// ==========================================
// 仅用于展示着色,不拒绝也不截断任何数值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PpmStatus {
    WithinTarget, // 达标
    AboveTarget,  // 超标
}

impl PpmStatus {
    /// ppm 严格大于目标才算超标
    pub fn classify(ppm: i64, target_ppm: i64) -> Self {
        if ppm > target_ppm {
            PpmStatus::AboveTarget
        } else {
            PpmStatus::WithinTarget
        }
    }
}

impl fmt::Display for PpmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PpmStatus::WithinTarget => write!(f, "WITHIN_TARGET"),
            PpmStatus::AboveTarget => write!(f, "ABOVE_TARGET"),
        }
    }
}

// ==========================================
// 数量合计
// ==========================================
// 数量字段不校验范围,合计在 i64 边界处饱和 (i64::MAX / i64::MIN),不溢出
pub fn saturating_total<I>(quantities: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    quantities.into_iter().fold(0i64, i64::saturating_add)
}
