// ==========================================
// 奶牛场生产管理系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 生产数据统计与收购定价核心
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 统计规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CattleRef, Shift};

// 领域实体
pub use domain::{
    CattleMaster, DailyTotal, MilkRecord, ProductionSummary, RateEntry, RateTable, RawMilkRecord,
    TrendPoint,
};

// 引擎
pub use engine::{MilkAggregator, PricingEngine};

// API
pub use api::{DashboardApi, ImportApi, ProductionApi, RateApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "奶牛场生产管理系统";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";

// ==========================================
// 预编译检查
// ==========================================
