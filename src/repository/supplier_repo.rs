// ==========================================
// 供应商质量管理门户 - 供应商数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 分类列存储未知值时按"未分类"读出,不报错
// ==========================================

use crate::domain::supplier::Supplier;
use crate::domain::types::{SupplierCategory, SupplierStatus};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::store::SupplierQuery;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// SupplierRepository - 供应商仓储
// ==========================================
pub struct SupplierRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SupplierRepository {
    /// 创建新的 SupplierRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新增或更新供应商
    pub fn upsert(&self, supplier: &Supplier) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO supplier (supplier_id, display_name, category, status)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(supplier_id) DO UPDATE SET
                display_name = excluded.display_name,
                category = excluded.category,
                status = excluded.status,
                updated_at = datetime('now')
            "#,
            params![
                supplier.supplier_id,
                supplier.display_name,
                supplier.category.map(|c| c.to_db_str()),
                supplier.status.to_string(),
            ],
        )?;
        Ok(())
    }

    /// 按 ID 查询,不存在时返回 NotFound
    pub fn get_by_id(&self, supplier_id: &str) -> RepositoryResult<Supplier> {
        self.find_by_id(supplier_id)?
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "Supplier".to_string(),
                id: supplier_id.to_string(),
            })
    }
}

impl SupplierQuery for SupplierRepository {
    fn find_by_id(&self, supplier_id: &str) -> RepositoryResult<Option<Supplier>> {
        let conn = self.get_conn()?;
        let supplier = conn
            .query_row(
                "SELECT supplier_id, display_name, category, status FROM supplier WHERE supplier_id = ?1",
                params![supplier_id],
                map_supplier_row,
            )
            .optional()?;
        Ok(supplier)
    }

    fn list_all(&self) -> RepositoryResult<Vec<Supplier>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT supplier_id, display_name, category, status FROM supplier ORDER BY supplier_id ASC",
        )?;
        let suppliers = stmt
            .query_map([], map_supplier_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(suppliers)
    }

    /// 分类列可能存有显示名 (Child-Part) 或存储名 (CHILD_PART),
    /// 统一经 SupplierCategory::parse 解析后再筛选
    fn list_by_category(&self, category: SupplierCategory) -> RepositoryResult<Vec<Supplier>> {
        let suppliers = self
            .list_all()?
            .into_iter()
            .filter(|supplier| supplier.belongs_to(category))
            .collect();
        Ok(suppliers)
    }
}

fn map_supplier_row(row: &Row<'_>) -> SqliteResult<Supplier> {
    let category: Option<String> = row.get(2)?;
    let status: String = row.get(3)?;
    Ok(Supplier {
        supplier_id: row.get(0)?,
        display_name: row.get(1)?,
        category: category.as_deref().and_then(SupplierCategory::parse),
        status: SupplierStatus::from_str(&status),
    })
}
