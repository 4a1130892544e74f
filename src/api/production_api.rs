// ==========================================
// 奶牛场生产管理系统 - 生产记录 API
// ==========================================
// 职责: 产奶记录的录入/查询/删除, 入参校验
// 架构: API 层 → Repository 层
// ==========================================

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::milk::MilkRecord;
use crate::domain::types::{CattleRef, Shift};
use crate::repository::milk_record_repo::MilkRecordRepository;

// ==========================================
// ProductionApi - 生产记录 API
// ==========================================
pub struct ProductionApi {
    record_repo: Arc<MilkRecordRepository>,
}

impl ProductionApi {
    /// 创建新的 ProductionApi 实例
    pub fn new(record_repo: Arc<MilkRecordRepository>) -> Self {
        Self { record_repo }
    }

    /// 录入一条产奶记录
    ///
    /// # 参数
    /// - `cattle`: 奶牛引用（裸 ID 或引用对象）
    /// - `record_date`: 记录日期
    /// - `shift`: 班次
    /// - `morning_amount_l` / `evening_amount_l`: 产量（升）, 不得为负
    /// - `notes`: 备注
    ///
    /// # 返回
    /// - Ok(String): 新记录的 record_id
    pub fn add_record(
        &self,
        cattle: CattleRef,
        record_date: NaiveDate,
        shift: Shift,
        morning_amount_l: Option<f64>,
        evening_amount_l: Option<f64>,
        notes: Option<String>,
    ) -> ApiResult<String> {
        if cattle.cattle_id().trim().is_empty() {
            return Err(ApiError::InvalidInput("奶牛ID不能为空".to_string()));
        }
        for (field, amount) in [
            ("早班产量", morning_amount_l),
            ("晚班产量", evening_amount_l),
        ] {
            if let Some(v) = amount {
                if v < 0.0 || !v.is_finite() {
                    return Err(ApiError::InvalidInput(format!(
                        "{}必须为非负有限数值: {}",
                        field, v
                    )));
                }
            }
        }
        if morning_amount_l.is_none() && evening_amount_l.is_none() {
            return Err(ApiError::InvalidInput(
                "早班/晚班产量不能同时为空".to_string(),
            ));
        }

        let now = Utc::now();
        let record = MilkRecord {
            record_id: Uuid::new_v4().to_string(),
            cattle,
            record_date,
            shift,
            morning_amount_l,
            evening_amount_l,
            notes,
            created_at: now,
            updated_at: now,
        };

        self.record_repo.insert(&record)?;
        Ok(record.record_id)
    }

    /// 按日期范围查询记录（两端含, None 端不设界）
    pub fn list_records(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> ApiResult<Vec<MilkRecord>> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(ApiError::InvalidInput(
                    "开始日期不能晚于结束日期".to_string(),
                ));
            }
        }
        Ok(self.record_repo.find_by_date_range(start, end)?)
    }

    /// 按奶牛查询记录
    pub fn list_records_for_cattle(
        &self,
        cattle_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> ApiResult<Vec<MilkRecord>> {
        if cattle_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("奶牛ID不能为空".to_string()));
        }
        Ok(self.record_repo.find_by_cattle(cattle_id, start, end)?)
    }

    /// 删除记录
    pub fn delete_record(&self, record_id: &str) -> ApiResult<()> {
        if record_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("记录ID不能为空".to_string()));
        }
        Ok(self.record_repo.delete(record_id)?)
    }
}
