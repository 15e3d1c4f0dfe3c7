// ==========================================
// 供应商质量管理门户 - 供应商主数据
// ==========================================
// 职责: 排名引擎所需的供应商元数据 (认证/联系方式等不在此处)
// ==========================================

use crate::domain::types::{SupplierCategory, SupplierStatus};
use serde::{Deserialize, Serialize};

/// 供应商
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    /// 供应商ID (例如 SUP001)
    pub supplier_id: String,

    /// 显示名称
    pub display_name: String,

    /// 所属分类 (None 表示未分类,不参与任何排名池)
    pub category: Option<SupplierCategory>,

    /// 账号状态
    pub status: SupplierStatus,
}

impl Supplier {
    pub fn new(
        supplier_id: impl Into<String>,
        display_name: impl Into<String>,
        category: Option<SupplierCategory>,
    ) -> Self {
        Self {
            supplier_id: supplier_id.into(),
            display_name: display_name.into(),
            category,
            status: SupplierStatus::Active,
        }
    }

    /// 是否属于指定分类
    pub fn belongs_to(&self, category: SupplierCategory) -> bool {
        self.category == Some(category)
    }
}
