// ==========================================
// 奶牛场生产管理系统 - 产奶记录领域模型
// ==========================================
// 对齐: milk_record 表
// 口径: 同一头牛同一天可存在多条记录（不同班次，
//       或合并日记录同时携带早/晚两个量），日合计
//       必须对其求和，不能互相覆盖
// ==========================================

use crate::domain::types::{CattleRef, Shift};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// MilkRecord - 产奶记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilkRecord {
    // ===== 主键 =====
    pub record_id: String, // 记录唯一标识（UUID）

    // ===== 归属 =====
    pub cattle: CattleRef,      // 奶牛引用（裸 ID 或引用对象）
    pub record_date: NaiveDate, // 记录日期（无时刻成分）
    pub shift: Shift,           // 班次

    // ===== 产量（升）=====
    // 缺失按 0 参与求和，绝不产生 NaN
    pub morning_amount_l: Option<f64>, // 早班产量
    pub evening_amount_l: Option<f64>, // 晚班产量

    // ===== 备注 =====
    pub notes: Option<String>,

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MilkRecord {
    /// 该条记录贡献的总升数（缺失量按 0 计）
    pub fn total_liters(&self) -> f64 {
        self.morning_amount_l.unwrap_or(0.0) + self.evening_amount_l.unwrap_or(0.0)
    }

    /// 归一化后的奶牛 ID
    pub fn cattle_id(&self) -> &str {
        self.cattle.cattle_id()
    }
}

// ==========================================
// RawMilkRecord - 导入中间结构体
// ==========================================
// 用途: 导入管道中间产物（文件解析 → 字段映射 → 此结构）
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMilkRecord {
    // 源字段（已类型转换）
    pub cattle_id: Option<String>,
    pub display_tag: Option<String>,
    pub record_date: Option<NaiveDate>,
    pub shift: Option<Shift>,
    pub morning_amount_l: Option<f64>,
    pub evening_amount_l: Option<f64>,
    pub notes: Option<String>,

    // 源文件行号（报错定位用）
    pub source_row: usize,
}

// ==========================================
// 派生统计结构（临时值, 每次查询重算, 不落库）
// ==========================================

/// 单日合计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_liters: f64,
}

/// 趋势点（图表序列）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total_liters: f64,
}

/// 生产概况（驾驶舱汇总）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionSummary {
    /// 统计锚点日期
    pub as_of: NaiveDate,

    // ===== 今日 =====
    pub today_total_l: f64,
    /// 早班占今日总量的百分比（今日总量为 0 时为 0）
    pub today_morning_share_pct: f64,

    // ===== 近 7 日（含锚点日）=====
    pub week_total_l: f64,
    /// 按有记录天数平均，而非日历跨度
    pub week_daily_avg_l: f64,

    // ===== 本月（月初至锚点日）=====
    pub month_total_l: f64,
    pub month_daily_avg_l: f64,
    /// 本月最高产奶日（无记录时为 None）
    pub month_highest_day: Option<DailyTotal>,
}

// ==========================================
// 导入结果
// ==========================================

/// 单行导入错误
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowError {
    pub row: usize,      // 源文件行号（1 起，含表头偏移）
    pub message: String, // 错误原因
}

/// 批量导入结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResult {
    pub batch_id: String, // 导入批次 ID（UUID）
    pub total_rows: usize,
    pub imported: usize,
    pub skipped: usize,
    pub row_errors: Vec<RowError>,
}
