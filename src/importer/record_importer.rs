// ==========================================
// 奶牛场生产管理系统 - 产奶记录导入器
// ==========================================
// 管道: 文件解析 → 字段映射 → 行校验 → 批量入库
// 口径: 单行失败只跳过该行并记录原因, 不中断整批;
//       文件级失败（不存在/格式不支持）整批报错
// ==========================================

use crate::domain::milk::{ImportResult, MilkRecord, RawMilkRecord, RowError};
use crate::domain::types::{CattleRef, Shift};
use crate::importer::error::ImportError;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::parse_file;
use crate::repository::milk_record_repo::MilkRecordRepository;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

// ==========================================
// MilkRecordImporter - 产奶记录导入器
// ==========================================
pub struct MilkRecordImporter {
    record_repo: Arc<MilkRecordRepository>,
}

impl MilkRecordImporter {
    /// 构造函数
    pub fn new(record_repo: Arc<MilkRecordRepository>) -> Self {
        Self { record_repo }
    }

    /// 从文件导入产奶记录
    ///
    /// # 参数
    /// - `file_path`: CSV / Excel 文件路径
    ///
    /// # 返回
    /// - Ok(ImportResult): 批次统计（含逐行错误清单）
    /// - Err(ImportError): 文件级失败
    pub fn import_file(&self, file_path: &Path) -> Result<ImportResult, ImportError> {
        let batch_id = Uuid::new_v4().to_string();
        tracing::info!(batch_id = %batch_id, path = %file_path.display(), "开始导入产奶记录");

        let rows = parse_file(file_path).map_err(|e| match e.downcast::<ImportError>() {
            Ok(import_err) => *import_err,
            Err(other) => ImportError::FileReadError(other.to_string()),
        })?;

        let total_rows = rows.len();
        let mut records: Vec<MilkRecord> = Vec::new();
        let mut row_errors: Vec<RowError> = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            let source_row = idx + 1; // 1 起, 不含表头

            let raw = match FieldMapper::map_row(row, source_row) {
                Ok(raw) => raw,
                Err(e) => {
                    row_errors.push(RowError {
                        row: source_row,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            match Self::validate_and_build(raw) {
                Ok(record) => records.push(record),
                Err(message) => row_errors.push(RowError {
                    row: source_row,
                    message,
                }),
            }
        }

        let imported = self
            .record_repo
            .batch_insert(&records)
            .map_err(|e| ImportError::PersistError(e.to_string()))?;

        let result = ImportResult {
            batch_id,
            total_rows,
            imported,
            skipped: row_errors.len(),
            row_errors,
        };

        tracing::info!(
            batch_id = %result.batch_id,
            total = result.total_rows,
            imported = result.imported,
            skipped = result.skipped,
            "产奶记录导入完成"
        );

        Ok(result)
    }

    // ==========================================
    // 行校验与实体构建
    // ==========================================

    /// 校验单行并构建 MilkRecord
    ///
    /// 规则:
    /// - cattle_id / record_date 必填
    /// - 产量不得为负; 两个产量都缺失的行无统计意义, 跳过
    /// - 班次缺失时从产量推断: 仅早班量 → 早班, 仅晚班量 → 晚班,
    ///   两者皆有（合并日记录）→ 早班
    fn validate_and_build(raw: RawMilkRecord) -> Result<MilkRecord, String> {
        let cattle_id = match raw.cattle_id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => return Err("cattle_id 为空".to_string()),
        };

        let record_date = raw.record_date.ok_or_else(|| "record_date 为空".to_string())?;

        if let Some(m) = raw.morning_amount_l {
            if m < 0.0 {
                return Err(format!("早班产量不得为负: {}", m));
            }
        }
        if let Some(e) = raw.evening_amount_l {
            if e < 0.0 {
                return Err(format!("晚班产量不得为负: {}", e));
            }
        }
        if raw.morning_amount_l.is_none() && raw.evening_amount_l.is_none() {
            return Err("早班/晚班产量均为空".to_string());
        }

        let shift = raw.shift.unwrap_or(match (
            raw.morning_amount_l.is_some(),
            raw.evening_amount_l.is_some(),
        ) {
            (false, true) => Shift::Evening,
            _ => Shift::Morning,
        });

        let cattle = match raw.display_tag {
            Some(tag) => CattleRef::Reference {
                cattle_id,
                display_tag: Some(tag),
            },
            None => CattleRef::RawId(cattle_id),
        };

        let now = Utc::now();
        Ok(MilkRecord {
            record_id: Uuid::new_v4().to_string(),
            cattle,
            record_date,
            shift,
            morning_amount_l: raw.morning_amount_l,
            evening_amount_l: raw.evening_amount_l,
            notes: raw.notes,
            created_at: now,
            updated_at: now,
        })
    }
}
