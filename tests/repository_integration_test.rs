// ==========================================
// Repository 集成测试
// ==========================================
// 测试目标: 文件数据库上的日报/供应商读写与规范化
// ==========================================

mod test_helpers;

use supplier_quality_portal::repository::{
    DailyLogQuery, DailyLogRepository, RepositoryError, SupplierQuery, SupplierRepository,
};
use supplier_quality_portal::{DailyLog, RejectionItem, Supplier, SupplierCategory, SupplierStatus};
use test_helpers::{create_test_db, open_test_connection, ymd};

#[test]
fn test_daily_log_full_record_roundtrip() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = DailyLogRepository::new(&db_path).expect("Failed to create repo");

    let mut log = DailyLog::new("SUP001", ymd(2025, 10, 1), "Housing", 120, 100, 6)
        .with_breakdown(vec![
            RejectionItem::new("Crack", 4),
            RejectionItem::new("Burr, \"sharp\" edge", 2),
        ])
        .with_summary("Crack, Burr")
        .with_complaints(2, Some("late paperwork".to_string()));
    log.remarks = Some("night shift".to_string());

    repo.upsert(&log).unwrap();
    let stored = repo
        .find_by_key("SUP001", ymd(2025, 10, 1), "Housing")
        .unwrap()
        .expect("log should exist");

    assert_eq!(stored, log);
}

#[test]
fn test_negative_quantities_pass_through() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = DailyLogRepository::new(&db_path).expect("Failed to create repo");

    let log = DailyLog::new("SUP001", ymd(2025, 10, 1), "Housing", -5, 100, -1);
    repo.upsert(&log).unwrap();

    let logs = repo.list_by_supplier("SUP001").unwrap();
    assert_eq!(logs[0].received_qty, -5);
    assert_eq!(logs[0].rejected_qty, -1);
}

#[test]
fn test_separate_connections_see_same_data() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let writer = DailyLogRepository::new(&db_path).expect("writer");
    let reader = DailyLogRepository::new(&db_path).expect("reader");

    writer
        .upsert(&DailyLog::new("SUP001", ymd(2025, 10, 1), "Housing", 1, 1, 0))
        .unwrap();

    assert_eq!(reader.list_by_supplier("SUP001").unwrap().len(), 1);
    assert!(reader.list_by_supplier("SUP002").unwrap().is_empty());
}

#[test]
fn test_corrupt_breakdown_json_is_reported() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = DailyLogRepository::new(&db_path).expect("Failed to create repo");
    repo.upsert(&DailyLog::new("SUP001", ymd(2025, 10, 1), "Housing", 1, 1, 0))
        .unwrap();

    let conn = open_test_connection(&db_path).unwrap();
    conn.execute("UPDATE daily_log SET rejection_breakdown = '{broken'", [])
        .unwrap();

    assert!(matches!(
        repo.list_by_supplier("SUP001"),
        Err(RepositoryError::DatabaseQueryError(_))
    ));
}

#[test]
fn test_supplier_unknown_category_reads_as_unassigned() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = SupplierRepository::new(&db_path).expect("Failed to create repo");

    let conn = open_test_connection(&db_path).unwrap();
    conn.execute(
        "INSERT INTO supplier (supplier_id, display_name, category, status) VALUES ('SUP777', 'Legacy Co', 'FORGING', 'PENDING_ACTIVATION')",
        [],
    )
    .unwrap();

    let supplier = repo.find_by_id("SUP777").unwrap().unwrap();
    assert_eq!(supplier.category, None);
    assert_eq!(supplier.status, SupplierStatus::PendingActivation);
    assert!(repo
        .list_by_category(SupplierCategory::PreMachining)
        .unwrap()
        .is_empty());
}

#[test]
fn test_supplier_category_stored_in_db_form() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = SupplierRepository::new(&db_path).expect("Failed to create repo");
    repo.upsert(&Supplier::new("SUP001", "Alpha", Some(SupplierCategory::ChildPart)))
        .unwrap();

    let conn = open_test_connection(&db_path).unwrap();
    let stored: String = conn
        .query_row(
            "SELECT category FROM supplier WHERE supplier_id = 'SUP001'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored, "CHILD_PART");
}
