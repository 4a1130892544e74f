// ==========================================
// 奶牛场生产管理系统 - 收购价率 API
// ==========================================
// 职责: 价率表维护与定价查询
// 架构: API 层 → Repository 层（取数） + Engine 层（定价）
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::rate::RateEntry;
use crate::engine::pricing::PricingEngine;
use crate::repository::rate_table_repo::RateTableRepository;

// ==========================================
// RateApi - 收购价率 API
// ==========================================
pub struct RateApi {
    rate_repo: Arc<RateTableRepository>,
    pricing: PricingEngine,
}

impl RateApi {
    /// 创建新的 RateApi 实例
    pub fn new(rate_repo: Arc<RateTableRepository>) -> Self {
        Self {
            rate_repo,
            pricing: PricingEngine::new(),
        }
    }

    /// 整表替换价率表
    ///
    /// # 返回
    /// - Ok(usize): 写入条目数
    pub fn replace_rate_table(&self, entries: Vec<RateEntry>) -> ApiResult<usize> {
        for entry in &entries {
            if entry.fat_pct < 0.0 || entry.snf_pct < 0.0 {
                return Err(ApiError::InvalidInput(format!(
                    "脂肪率/非脂乳固体率不得为负: fat={}, snf={}",
                    entry.fat_pct, entry.snf_pct
                )));
            }
            if entry.rate_per_liter <= 0.0 {
                return Err(ApiError::InvalidInput(format!(
                    "每升价必须为正数: {}（0 为“未知价”保留值）",
                    entry.rate_per_liter
                )));
            }
        }
        Ok(self.rate_repo.replace_all(&entries)?)
    }

    /// 查询每升收购价
    ///
    /// 精确命中返回表中价; 未命中返回 0.0（“未知价”）
    pub fn get_rate(&self, fat_pct: f64, snf_pct: f64) -> ApiResult<f64> {
        let table = self.rate_repo.load_table()?;
        Ok(self.pricing.rate_for(&table, fat_pct, snf_pct))
    }

    /// 估算一批奶的收购金额（价率未知时为 0）
    pub fn get_batch_value(&self, fat_pct: f64, snf_pct: f64, liters: f64) -> ApiResult<f64> {
        if liters < 0.0 {
            return Err(ApiError::InvalidInput(format!("升数不得为负: {}", liters)));
        }
        let table = self.rate_repo.load_table()?;
        Ok(self.pricing.batch_value(&table, fat_pct, snf_pct, liters))
    }

    /// 读取整表
    pub fn list_rates(&self) -> ApiResult<Vec<RateEntry>> {
        Ok(self.rate_repo.load_table()?.entries().to_vec())
    }
}
