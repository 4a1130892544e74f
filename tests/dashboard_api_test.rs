// ==========================================
// DashboardApi 集成测试
// ==========================================
// 测试范围:
// 1. 生产概况: get_production_summary
// 2. 日合计/周期合计: get_daily_total, get_period_total
// 3. 趋势: get_trend（显式窗口与配置窗口）
// 4. 单牛周均: get_weekly_average_for_cattle
// ==========================================

mod test_helpers;

use std::sync::{Arc, Mutex};

use dairy_farm_ms::api::{ApiError, DashboardApi};
use dairy_farm_ms::config::ConfigManager;
use dairy_farm_ms::domain::types::Shift;
use dairy_farm_ms::repository::MilkRecordRepository;
use rusqlite::Connection;
use tempfile::NamedTempFile;
use test_helpers::{date, MilkRecordBuilder};

// ==========================================
// 测试环境
// ==========================================

struct TestEnv {
    dashboard_api: DashboardApi,
    record_repo: Arc<MilkRecordRepository>,
    config: Arc<ConfigManager>,
    _temp_file: NamedTempFile,
}

impl TestEnv {
    fn new() -> Self {
        let (temp_file, db_path) = test_helpers::create_test_db().expect("无法创建测试数据库");

        let conn = Connection::open(&db_path).expect("无法打开数据库");
        let conn = Arc::new(Mutex::new(conn));

        let record_repo = Arc::new(MilkRecordRepository::from_connection(conn.clone()));
        let config =
            Arc::new(ConfigManager::from_connection(conn.clone()).expect("无法创建配置管理器"));
        let dashboard_api = DashboardApi::new(record_repo.clone(), config.clone());

        Self {
            dashboard_api,
            record_repo,
            config,
            _temp_file: temp_file,
        }
    }

    /// 写入规格样例数据（2024-01-01: 23 L, 2024-01-02: 12 L）
    fn seed_sample(&self) {
        let records = vec![
            MilkRecordBuilder::new("C001", date(2024, 1, 1))
                .morning(10.0)
                .evening(8.0)
                .build(),
            MilkRecordBuilder::new("C002", date(2024, 1, 1))
                .shift(Shift::Evening)
                .evening(5.0)
                .build(),
            MilkRecordBuilder::new("C001", date(2024, 1, 2))
                .morning(12.0)
                .evening(0.0)
                .build(),
        ];
        self.record_repo.batch_insert(&records).expect("写入失败");
    }
}

// ==========================================
// 生产概况
// ==========================================

#[test]
fn test_get_production_summary_规格样例() {
    let env = TestEnv::new();
    env.seed_sample();

    let summary = env
        .dashboard_api
        .get_production_summary(Some(date(2024, 1, 2)))
        .expect("查询失败");

    assert_eq!(summary.today_total_l, 12.0);
    assert_eq!(summary.week_total_l, 35.0);
    assert_eq!(summary.week_daily_avg_l, 17.5);
    assert_eq!(summary.month_total_l, 35.0);
    assert_eq!(summary.month_daily_avg_l, 17.5);

    let highest = summary.month_highest_day.expect("应有最高日");
    assert_eq!(highest.date, date(2024, 1, 1));
    assert_eq!(highest.total_liters, 23.0);
}

#[test]
fn test_get_production_summary_空库() {
    let env = TestEnv::new();

    let summary = env
        .dashboard_api
        .get_production_summary(Some(date(2024, 1, 2)))
        .expect("查询失败");

    assert_eq!(summary.today_total_l, 0.0);
    assert_eq!(summary.week_daily_avg_l, 0.0);
    assert!(summary.month_highest_day.is_none());
}

// ==========================================
// 日合计 / 周期合计
// ==========================================

#[test]
fn test_get_daily_total() {
    let env = TestEnv::new();
    env.seed_sample();

    let total = env
        .dashboard_api
        .get_daily_total(date(2024, 1, 1))
        .expect("查询失败");
    assert_eq!(total, 23.0);
}

#[test]
fn test_get_period_total() {
    let env = TestEnv::new();
    env.seed_sample();

    let total = env
        .dashboard_api
        .get_period_total(Some(date(2024, 1, 1)), Some(date(2024, 1, 2)))
        .expect("查询失败");
    assert_eq!(total, 35.0);
}

#[test]
fn test_get_period_total_日期顺序校验() {
    let env = TestEnv::new();

    let result = env
        .dashboard_api
        .get_period_total(Some(date(2024, 2, 1)), Some(date(2024, 1, 1)));
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

// ==========================================
// 趋势
// ==========================================

#[test]
fn test_get_trend_显式窗口() {
    let env = TestEnv::new();
    for day in 1..=10 {
        env.record_repo
            .insert(
                &MilkRecordBuilder::new("C001", date(2024, 1, day))
                    .morning(day as f64)
                    .build(),
            )
            .expect("写入失败");
    }

    let trend = env.dashboard_api.get_trend(Some(7)).expect("查询失败");
    assert_eq!(trend.len(), 7);
    assert_eq!(trend.first().unwrap().date, date(2024, 1, 4));
    assert_eq!(trend.last().unwrap().date, date(2024, 1, 10));
}

#[test]
fn test_get_trend_配置窗口() {
    let env = TestEnv::new();
    env.config.set_trend_window_days(3).expect("写配置失败");
    for day in 1..=10 {
        env.record_repo
            .insert(
                &MilkRecordBuilder::new("C001", date(2024, 1, day))
                    .morning(day as f64)
                    .build(),
            )
            .expect("写入失败");
    }

    let trend = env.dashboard_api.get_trend(None).expect("查询失败");
    assert_eq!(trend.len(), 3);
}

#[test]
fn test_get_trend_零窗口被拒() {
    let env = TestEnv::new();
    let result = env.dashboard_api.get_trend(Some(0));
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

// ==========================================
// 单牛周均
// ==========================================

#[test]
fn test_get_weekly_average_for_cattle() {
    let env = TestEnv::new();
    env.seed_sample();

    // C001: 1 月 1 日 18 L + 1 月 2 日 12 L ⇒ 两个有记录日, 日均 15
    let avg = env
        .dashboard_api
        .get_weekly_average_for_cattle("C001", Some(date(2024, 1, 2)))
        .expect("查询失败");
    assert_eq!(avg, 15.0);
}

#[test]
fn test_get_weekly_average_for_cattle_空ID被拒() {
    let env = TestEnv::new();
    let result = env
        .dashboard_api
        .get_weekly_average_for_cattle("  ", Some(date(2024, 1, 2)));
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}
