// ==========================================
// 奶牛场生产管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、业务规则接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod cattle;
pub mod milk;
pub mod rate;
pub mod types;

// 重导出核心类型
pub use cattle::CattleMaster;
pub use milk::{
    DailyTotal, ImportResult, MilkRecord, ProductionSummary, RawMilkRecord, RowError, TrendPoint,
};
pub use rate::{pct_to_basis_points, RateEntry, RateTable};
pub use types::{CattleRef, Shift};
