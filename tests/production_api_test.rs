// ==========================================
// ProductionApi 集成测试
// ==========================================
// 测试范围:
// 1. 录入: 正常录入、负产量/全空产量/空牛号被拒
// 2. 查询: 日期范围、按牛
// 3. 删除: 正常删除、不存在报错
// ==========================================

mod test_helpers;

use std::sync::{Arc, Mutex};

use dairy_farm_ms::api::{ApiError, ProductionApi};
use dairy_farm_ms::domain::types::{CattleRef, Shift};
use dairy_farm_ms::repository::MilkRecordRepository;
use rusqlite::Connection;
use tempfile::NamedTempFile;
use test_helpers::date;

fn setup() -> (ProductionApi, Arc<MilkRecordRepository>, NamedTempFile) {
    let (temp_file, db_path) = test_helpers::create_test_db().expect("无法创建测试数据库");
    let conn = Arc::new(Mutex::new(Connection::open(&db_path).expect("无法打开数据库")));
    let record_repo = Arc::new(MilkRecordRepository::from_connection(conn));
    (ProductionApi::new(record_repo.clone()), record_repo, temp_file)
}

#[test]
fn test_add_record_正常录入() {
    let (api, record_repo, _tmp) = setup();

    let record_id = api
        .add_record(
            CattleRef::RawId("C001".to_string()),
            date(2024, 1, 1),
            Shift::Morning,
            Some(10.5),
            None,
            Some("正常".to_string()),
        )
        .expect("录入失败");

    let loaded = record_repo
        .find_by_id(&record_id)
        .expect("查询失败")
        .expect("应存在");
    assert_eq!(loaded.cattle_id(), "C001");
    assert_eq!(loaded.total_liters(), 10.5);
}

#[test]
fn test_add_record_负产量被拒() {
    let (api, _, _tmp) = setup();

    let result = api.add_record(
        CattleRef::RawId("C001".to_string()),
        date(2024, 1, 1),
        Shift::Morning,
        Some(-1.0),
        None,
        None,
    );
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_add_record_产量全空被拒() {
    let (api, _, _tmp) = setup();

    let result = api.add_record(
        CattleRef::RawId("C001".to_string()),
        date(2024, 1, 1),
        Shift::Morning,
        None,
        None,
        None,
    );
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_add_record_空牛号被拒() {
    let (api, _, _tmp) = setup();

    let result = api.add_record(
        CattleRef::RawId("  ".to_string()),
        date(2024, 1, 1),
        Shift::Morning,
        Some(10.0),
        None,
        None,
    );
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_list_records_与按牛查询() {
    let (api, _, _tmp) = setup();

    api.add_record(
        CattleRef::RawId("C001".to_string()),
        date(2024, 1, 1),
        Shift::Morning,
        Some(10.0),
        None,
        None,
    )
    .expect("录入失败");
    api.add_record(
        CattleRef::RawId("C002".to_string()),
        date(2024, 1, 3),
        Shift::Evening,
        None,
        Some(8.0),
        None,
    )
    .expect("录入失败");

    let all = api.list_records(None, None).expect("查询失败");
    assert_eq!(all.len(), 2);

    let in_range = api
        .list_records(Some(date(2024, 1, 2)), Some(date(2024, 1, 3)))
        .expect("查询失败");
    assert_eq!(in_range.len(), 1);

    let for_cattle = api
        .list_records_for_cattle("C001", None, None)
        .expect("查询失败");
    assert_eq!(for_cattle.len(), 1);
    assert_eq!(for_cattle[0].cattle_id(), "C001");
}

#[test]
fn test_delete_record() {
    let (api, _, _tmp) = setup();

    let record_id = api
        .add_record(
            CattleRef::RawId("C001".to_string()),
            date(2024, 1, 1),
            Shift::Morning,
            Some(10.0),
            None,
            None,
        )
        .expect("录入失败");

    api.delete_record(&record_id).expect("删除失败");

    let result = api.delete_record(&record_id);
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}
