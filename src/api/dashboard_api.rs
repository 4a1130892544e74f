// ==========================================
// 奶牛场生产管理系统 - 驾驶舱 API
// ==========================================
// 职责: 提供驾驶舱聚合查询（今日/近7日/本月/趋势/单牛周均）
// 架构: API 层 → Repository 层（取数） + Engine 层（统计）
// 口径: 统计口径全部由 MilkAggregator 承担, 本层只负责
//       取数、锚点日期补齐与入参校验
// ==========================================

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::ConfigManager;
use crate::domain::milk::{DailyTotal, ProductionSummary, TrendPoint};
use crate::engine::aggregation::MilkAggregator;
use crate::repository::milk_record_repo::MilkRecordRepository;

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================

/// 驾驶舱API
///
/// 职责：
/// 1. 生产概况（今日合计/早班占比/近7日/本月/最高日）
/// 2. 趋势序列（图表）
/// 3. 单牛近7日日均
pub struct DashboardApi {
    record_repo: Arc<MilkRecordRepository>,
    config: Arc<ConfigManager>,
    aggregator: MilkAggregator,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    ///
    /// # 参数
    /// - record_repo: 产奶记录 Repository
    /// - config: 配置管理器（趋势窗口等）
    pub fn new(record_repo: Arc<MilkRecordRepository>, config: Arc<ConfigManager>) -> Self {
        Self {
            record_repo,
            config,
            aggregator: MilkAggregator::new(),
        }
    }

    /// 生产概况
    ///
    /// # 参数
    /// - as_of: 统计锚点日期（None 时取本地今天）
    pub fn get_production_summary(&self, as_of: Option<NaiveDate>) -> ApiResult<ProductionSummary> {
        let as_of = as_of.unwrap_or_else(|| chrono::Local::now().date_naive());

        // 概况只需要本月及近 7 日数据, 取到月初与 7 日窗口中较早者即可
        let week_start = as_of - chrono::Duration::days(6);
        let month_start = as_of.with_day(1).unwrap_or(as_of);
        let fetch_start = week_start.min(month_start);

        let records = self
            .record_repo
            .find_by_date_range(Some(fetch_start), Some(as_of))?;

        Ok(self.aggregator.summarize(&records, as_of))
    }

    /// 单日产奶合计
    pub fn get_daily_total(&self, date: NaiveDate) -> ApiResult<f64> {
        let records = self.record_repo.find_by_date_range(Some(date), Some(date))?;
        Ok(self.aggregator.daily_total(&records, date))
    }

    /// 周期产奶合计（两端含; end 缺省为今天）
    pub fn get_period_total(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> ApiResult<f64> {
        let end = end.unwrap_or_else(|| chrono::Local::now().date_naive());
        if let Some(s) = start {
            if s > end {
                return Err(ApiError::InvalidInput(
                    "开始日期不能晚于结束日期".to_string(),
                ));
            }
        }
        let records = self.record_repo.find_by_date_range(start, Some(end))?;
        Ok(self.aggregator.period_total(&records, start, Some(end)))
    }

    /// 趋势序列
    ///
    /// # 参数
    /// - window_days: 窗口天数（None 时读配置, 默认 7）
    pub fn get_trend(&self, window_days: Option<usize>) -> ApiResult<Vec<TrendPoint>> {
        let window = match window_days {
            Some(0) => {
                return Err(ApiError::InvalidInput("窗口天数必须大于0".to_string()));
            }
            Some(days) => days,
            None => self
                .config
                .get_trend_window_days()
                .map_err(|e| ApiError::InternalError(e.to_string()))?,
        };

        let records = self.record_repo.list_all()?;
        Ok(self.aggregator.trend(&records, window))
    }

    /// 单牛近 7 日日均产奶量
    ///
    /// # 参数
    /// - cattle_id: 奶牛ID
    /// - as_of: 锚点日期（None 时取本地今天）
    pub fn get_weekly_average_for_cattle(
        &self,
        cattle_id: &str,
        as_of: Option<NaiveDate>,
    ) -> ApiResult<f64> {
        if cattle_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("奶牛ID不能为空".to_string()));
        }
        let as_of = as_of.unwrap_or_else(|| chrono::Local::now().date_naive());
        let window_start = as_of - chrono::Duration::days(6);

        let records =
            self.record_repo
                .find_by_cattle(cattle_id, Some(window_start), Some(as_of))?;
        Ok(self
            .aggregator
            .weekly_average_for_cattle(&records, cattle_id, as_of))
    }

    /// 周期内最高产奶日（并列取最早日期）
    pub fn get_highest_day(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> ApiResult<Option<DailyTotal>> {
        let end = end.unwrap_or_else(|| chrono::Local::now().date_naive());
        let records = self.record_repo.find_by_date_range(start, Some(end))?;
        Ok(self.aggregator.highest_day(&records, start, Some(end)))
    }
}
