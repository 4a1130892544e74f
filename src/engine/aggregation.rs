// ==========================================
// 奶牛场生产管理系统 - 产奶统计引擎
// ==========================================
// 职责: 驾驶舱指标生成（日合计/周期合计/日均/趋势）
// 输入: 产奶记录列表（显式参数, 不读取全局状态）
// 输出: 派生统计值（临时值, 不落库）
// ==========================================
// 红线: Engine 不拼 SQL; 纯折叠, 无 I/O, 不可失败
// 口径: 缺失产量按 0 参与求和, 绝不产生 NaN;
//       日均分母 = 有记录的天数, 不是日历跨度
// ==========================================

use crate::domain::milk::{DailyTotal, MilkRecord, ProductionSummary, TrendPoint};
use chrono::{Datelike, Days, NaiveDate};
use std::collections::BTreeMap;

/// 默认趋势窗口（天）
pub const DEFAULT_TREND_WINDOW_DAYS: usize = 7;

// ==========================================
// MilkAggregator - 产奶统计引擎
// ==========================================
pub struct MilkAggregator {
    // 无状态引擎,不需要注入依赖
    // Repository 操作由调用方处理
}

impl Default for MilkAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl MilkAggregator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心统计方法
    // ==========================================

    /// 单日产奶合计（升）
    ///
    /// 对 record_date 等于目标日期的所有记录求 早班+晚班 之和；
    /// 无匹配记录返回 0.0
    pub fn daily_total(&self, records: &[MilkRecord], date: NaiveDate) -> f64 {
        records
            .iter()
            .filter(|r| r.record_date == date)
            .map(|r| r.total_liters())
            .sum()
    }

    /// 周期产奶合计（升）, 区间两端含
    ///
    /// # 参数
    /// - `start`: 起始日期, None 表示不设下界
    /// - `end`: 结束日期, None 表示不设上界
    ///
    /// 说明: “end 缺省为今天”的口径由 API 层补齐锚点日期,
    /// 引擎本身不读取时钟
    pub fn period_total(
        &self,
        records: &[MilkRecord],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> f64 {
        records
            .iter()
            .filter(|r| Self::in_range(r.record_date, start, end))
            .map(|r| r.total_liters())
            .sum()
    }

    /// 周期内日均产奶量（升/天）
    ///
    /// 按日期分组求和后, 除以**有记录的天数**（非日历跨度）。
    /// 30 天区间内只有 3 天有记录时分母是 3 而不是 30。
    /// 区间内无记录返回 0.0（不是 NaN, 不报除零错）
    pub fn daily_average(
        &self,
        records: &[MilkRecord],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> f64 {
        let by_date = self.totals_by_date(records, start, end);
        if by_date.is_empty() {
            return 0.0;
        }
        let total: f64 = by_date.values().sum();
        total / by_date.len() as f64
    }

    /// 单头牛近 7 日日均产奶量（升/天）
    ///
    /// 取该牛在 [as_of - 6 天, as_of] 内的记录（共 7 个日历日,
    /// 含锚点日）, 按日期分组求和后除以有记录的天数
    pub fn weekly_average_for_cattle(
        &self,
        records: &[MilkRecord],
        cattle_id: &str,
        as_of: NaiveDate,
    ) -> f64 {
        let window_start = as_of.checked_sub_days(Days::new(6));
        let filtered: Vec<&MilkRecord> = records
            .iter()
            .filter(|r| r.cattle_id() == cattle_id)
            .collect();

        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in filtered {
            if Self::in_range(record.record_date, window_start, Some(as_of)) {
                *by_date.entry(record.record_date).or_insert(0.0) += record.total_liters();
            }
        }

        if by_date.is_empty() {
            return 0.0;
        }
        let total: f64 = by_date.values().sum();
        total / by_date.len() as f64
    }

    /// 周期内最高产奶日
    ///
    /// 并列时取最早日期（按日期升序遍历, 仅严格更大才替换）;
    /// 区间内无记录返回 None
    pub fn highest_day(
        &self,
        records: &[MilkRecord],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Option<DailyTotal> {
        let by_date = self.totals_by_date(records, start, end);

        let mut best: Option<DailyTotal> = None;
        for (date, total) in by_date {
            // 升序遍历 + 严格大于 ⇒ 并列保留最早日期
            if best.as_ref().map_or(true, |b| total > b.total_liters) {
                best = Some(DailyTotal {
                    date,
                    total_liters: total,
                });
            }
        }
        best
    }

    /// 趋势序列（图表用）
    ///
    /// 按日期分组求和, 日期升序, 截取**最后** window_days 个点。
    /// 每次从全量输入重算, 无增量维护; 无重复日期
    pub fn trend(&self, records: &[MilkRecord], window_days: usize) -> Vec<TrendPoint> {
        let by_date = self.totals_by_date(records, None, None);
        let points: Vec<TrendPoint> = by_date
            .into_iter()
            .map(|(date, total_liters)| TrendPoint { date, total_liters })
            .collect();

        let skip = points.len().saturating_sub(window_days);
        points.into_iter().skip(skip).collect()
    }

    /// 早班占单日总量的百分比
    ///
    /// 当日总量为 0 时返回 0.0（避免除零）
    pub fn morning_share(&self, records: &[MilkRecord], date: NaiveDate) -> f64 {
        let day_records: Vec<&MilkRecord> = records
            .iter()
            .filter(|r| r.record_date == date)
            .collect();

        let total: f64 = day_records.iter().map(|r| r.total_liters()).sum();
        if total == 0.0 {
            return 0.0;
        }

        let morning: f64 = day_records
            .iter()
            .map(|r| r.morning_amount_l.unwrap_or(0.0))
            .sum();
        morning / total * 100.0
    }

    // ==========================================
    // 汇总生成
    // ==========================================

    /// 生成生产概况（驾驶舱汇总）
    ///
    /// # 参数
    /// - `records`: 产奶记录列表
    /// - `as_of`: 统计锚点日期（“今天”由调用方传入）
    ///
    /// # 口径
    /// - 近 7 日: [as_of - 6 天, as_of]
    /// - 本月: [当月 1 日, as_of]
    pub fn summarize(&self, records: &[MilkRecord], as_of: NaiveDate) -> ProductionSummary {
        let week_start = as_of.checked_sub_days(Days::new(6));
        let month_start = as_of.with_day(1);

        ProductionSummary {
            as_of,
            today_total_l: self.daily_total(records, as_of),
            today_morning_share_pct: self.morning_share(records, as_of),
            week_total_l: self.period_total(records, week_start, Some(as_of)),
            week_daily_avg_l: self.daily_average(records, week_start, Some(as_of)),
            month_total_l: self.period_total(records, month_start, Some(as_of)),
            month_daily_avg_l: self.daily_average(records, month_start, Some(as_of)),
            month_highest_day: self.highest_day(records, month_start, Some(as_of)),
        }
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 按日期分组求和（BTreeMap 保证日期升序、无重复键）
    fn totals_by_date(
        &self,
        records: &[MilkRecord],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> BTreeMap<NaiveDate, f64> {
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in records {
            if Self::in_range(record.record_date, start, end) {
                *by_date.entry(record.record_date).or_insert(0.0) += record.total_liters();
            }
        }
        by_date
    }

    /// 日期是否落在闭区间 [start, end] 内（None 端不设界）
    fn in_range(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        if let Some(s) = start {
            if date < s {
                return false;
            }
        }
        if let Some(e) = end {
            if date > e {
                return false;
            }
        }
        true
    }
}
