// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据构建等功能
// ==========================================

use chrono::{NaiveDate, Utc};
use dairy_farm_ms::domain::milk::MilkRecord;
use dairy_farm_ms::domain::types::{CattleRef, Shift};
use rusqlite::Connection;
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = Connection::open(&db_path)?;
    dairy_farm_ms::db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}

// ==========================================
// MilkRecordBuilder - 产奶记录构建器
// ==========================================

/// 测试用产奶记录构建器（默认值可逐项覆盖）
pub struct MilkRecordBuilder {
    record: MilkRecord,
}

impl MilkRecordBuilder {
    pub fn new(cattle_id: &str, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            record: MilkRecord {
                record_id: uuid_string(),
                cattle: CattleRef::RawId(cattle_id.to_string()),
                record_date: date,
                shift: Shift::Morning,
                morning_amount_l: None,
                evening_amount_l: None,
                notes: None,
                created_at: now,
                updated_at: now,
            },
        }
    }

    pub fn shift(mut self, shift: Shift) -> Self {
        self.record.shift = shift;
        self
    }

    pub fn morning(mut self, liters: f64) -> Self {
        self.record.morning_amount_l = Some(liters);
        self
    }

    pub fn evening(mut self, liters: f64) -> Self {
        self.record.evening_amount_l = Some(liters);
        self
    }

    pub fn display_tag(mut self, tag: &str) -> Self {
        let cattle_id = self.record.cattle.cattle_id().to_string();
        self.record.cattle = CattleRef::Reference {
            cattle_id,
            display_tag: Some(tag.to_string()),
        };
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.record.notes = Some(notes.to_string());
        self
    }

    pub fn build(self) -> MilkRecord {
        self.record
    }
}

fn uuid_string() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 便捷日期构造
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
