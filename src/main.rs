// ==========================================
// 奶牛场生产管理系统 - 命令行入口
// ==========================================
// 用法:
//   cargo run -- [db_path] [as_of:YYYY-MM-DD]
//
// 打开（必要时初始化）数据库, 输出驾驶舱生产概况与趋势。
// 不含任何网络/界面层, 供运维与排查使用。
// ==========================================

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use dairy_farm_ms::api::DashboardApi;
use dairy_farm_ms::config::ConfigManager;
use dairy_farm_ms::db::{default_db_path, init_schema, open_sqlite_connection};
use dairy_farm_ms::repository::MilkRecordRepository;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志系统
    dairy_farm_ms::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", dairy_farm_ms::APP_NAME);
    tracing::info!("系统版本: {}", dairy_farm_ms::VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1);
    let db_path = args.next().unwrap_or_else(default_db_path);
    tracing::info!("使用数据库: {}", db_path);

    let as_of = match args.next() {
        Some(raw) => Some(NaiveDate::parse_from_str(&raw, "%Y-%m-%d")?),
        None => None,
    };

    let conn = Arc::new(Mutex::new(open_sqlite_connection(&db_path)?));
    {
        let guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        init_schema(&guard)?;
    }

    let record_repo = Arc::new(MilkRecordRepository::from_connection(conn.clone()));
    let config = Arc::new(ConfigManager::from_connection(conn.clone())?);
    let dashboard_api = DashboardApi::new(record_repo, config.clone());

    // 切换界面语言
    dairy_farm_ms::i18n::set_locale(&config.get_locale()?);

    let farm_name = config.get_farm_name()?;
    let summary = dashboard_api.get_production_summary(as_of)?;

    println!("牧场: {}", farm_name);
    println!("统计日期: {}", summary.as_of);
    println!(
        "{}: {:.1} L（早班占比 {:.1}%）",
        dairy_farm_ms::i18n::t("dashboard.today_total"),
        summary.today_total_l,
        summary.today_morning_share_pct
    );
    println!(
        "{}: {:.1} L（日均 {:.1} L）",
        dairy_farm_ms::i18n::t("dashboard.week_total"),
        summary.week_total_l,
        summary.week_daily_avg_l
    );
    println!(
        "{}: {:.1} L（日均 {:.1} L）",
        dairy_farm_ms::i18n::t("dashboard.month_total"),
        summary.month_total_l,
        summary.month_daily_avg_l
    );
    if let Some(highest) = &summary.month_highest_day {
        println!(
            "{}: {} （{:.1} L）",
            dairy_farm_ms::i18n::t("dashboard.highest_day"),
            highest.date,
            highest.total_liters
        );
    }

    let window = config.get_trend_window_days()?;
    println!("趋势（近 {} 日）:", window);
    for point in dashboard_api.get_trend(Some(window))? {
        println!("  {}  {:.1} L", point.date, point.total_liters);
    }

    Ok(())
}
