// ==========================================
// 奶牛场生产管理系统 - 字段映射器
// ==========================================
// 阶段 1: 表头行映射 → RawMilkRecord
// 支持中英文表头别名; 日期兼容 YYYY-MM-DD / YYYYMMDD / YYYY/MM/DD
// ==========================================

use crate::domain::milk::RawMilkRecord;
use crate::domain::types::Shift;
use crate::importer::error::ImportError;
use chrono::NaiveDate;
use std::collections::HashMap;

// 表头别名（全部比较前先 trim + 小写化处理英文）
const CATTLE_ID_ALIASES: &[&str] = &["cattle_id", "cattleid", "牛号", "奶牛编号"];
const TAG_ALIASES: &[&str] = &["tag_no", "tag", "display_tag", "耳标号"];
const DATE_ALIASES: &[&str] = &["date", "record_date", "日期", "记录日期"];
const SHIFT_ALIASES: &[&str] = &["shift", "班次"];
const MORNING_ALIASES: &[&str] = &["morning", "morning_amount", "早班产量", "早班"];
const EVENING_ALIASES: &[&str] = &["evening", "evening_amount", "晚班产量", "晚班"];
const NOTES_ALIASES: &[&str] = &["notes", "note", "remark", "备注"];

// ==========================================
// FieldMapper - 字段映射器
// ==========================================
pub struct FieldMapper;

impl FieldMapper {
    /// 将一行表头映射转换为 RawMilkRecord
    ///
    /// # 参数
    /// - `row`: 文件解析阶段产出的 表头 → 单元格文本
    /// - `source_row`: 源文件行号（1 起, 不含表头）
    ///
    /// # 错误
    /// 数值/日期转换失败时返回带行号与字段名的错误;
    /// 字段缺失不在此处报错（交给校验阶段）
    pub fn map_row(
        row: &HashMap<String, String>,
        source_row: usize,
    ) -> Result<RawMilkRecord, ImportError> {
        let cattle_id = Self::pick(row, CATTLE_ID_ALIASES);
        let display_tag = Self::pick(row, TAG_ALIASES);
        let notes = Self::pick(row, NOTES_ALIASES);

        let record_date = match Self::pick(row, DATE_ALIASES) {
            Some(raw) => Some(Self::parse_date(&raw, source_row, "record_date")?),
            None => None,
        };

        let shift = Self::pick(row, SHIFT_ALIASES).and_then(|s| Shift::from_str(&s));

        let morning_amount_l =
            Self::parse_amount(Self::pick(row, MORNING_ALIASES), source_row, "morning_amount")?;
        let evening_amount_l =
            Self::parse_amount(Self::pick(row, EVENING_ALIASES), source_row, "evening_amount")?;

        Ok(RawMilkRecord {
            cattle_id,
            display_tag,
            record_date,
            shift,
            morning_amount_l,
            evening_amount_l,
            notes,
            source_row,
        })
    }

    /// 从行映射中按别名取第一个非空值
    fn pick(row: &HashMap<String, String>, aliases: &[&str]) -> Option<String> {
        for (key, value) in row {
            let normalized = key.trim().to_lowercase();
            if aliases.iter().any(|a| *a == normalized || *a == key.trim()) {
                let v = value.trim();
                if !v.is_empty() {
                    return Some(v.to_string());
                }
            }
        }
        None
    }

    /// 解析日期（YYYY-MM-DD / YYYYMMDD / YYYY/MM/DD）
    fn parse_date(raw: &str, row: usize, field: &str) -> Result<NaiveDate, ImportError> {
        for fmt in ["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d"] {
            if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
                return Ok(date);
            }
        }
        Err(ImportError::DateFormatError {
            row,
            field: field.to_string(),
            value: raw.to_string(),
        })
    }

    /// 解析产量（空白 → None; 非数值报错）
    fn parse_amount(
        raw: Option<String>,
        row: usize,
        field: &str,
    ) -> Result<Option<f64>, ImportError> {
        match raw {
            None => Ok(None),
            Some(s) => s
                .parse::<f64>()
                .map(Some)
                .map_err(|e| ImportError::TypeConversionError {
                    row,
                    field: field.to_string(),
                    message: e.to_string(),
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_map_row_中文表头() {
        let raw = FieldMapper::map_row(
            &row(&[
                ("牛号", "C001"),
                ("日期", "2024-01-01"),
                ("班次", "早班"),
                ("早班产量", "10.5"),
            ]),
            1,
        )
        .expect("映射失败");

        assert_eq!(raw.cattle_id.as_deref(), Some("C001"));
        assert_eq!(
            raw.record_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert_eq!(raw.shift, Some(Shift::Morning));
        assert_eq!(raw.morning_amount_l, Some(10.5));
        assert_eq!(raw.evening_amount_l, None);
    }

    #[test]
    fn test_map_row_紧凑日期() {
        let raw = FieldMapper::map_row(
            &row(&[("cattle_id", "C002"), ("date", "20240115")]),
            3,
        )
        .expect("映射失败");
        assert_eq!(
            raw.record_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_map_row_非法日期报错() {
        let err = FieldMapper::map_row(
            &row(&[("cattle_id", "C003"), ("date", "01-2024-05")]),
            7,
        )
        .unwrap_err();
        match err {
            ImportError::DateFormatError { row, .. } => assert_eq!(row, 7),
            other => panic!("期望 DateFormatError, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_map_row_非数值产量报错() {
        let err = FieldMapper::map_row(
            &row(&[
                ("cattle_id", "C004"),
                ("date", "2024-01-01"),
                ("morning", "十升"),
            ]),
            9,
        )
        .unwrap_err();
        match err {
            ImportError::TypeConversionError { row, field, .. } => {
                assert_eq!(row, 9);
                assert_eq!(field, "morning_amount");
            }
            other => panic!("期望 TypeConversionError, 实际 {:?}", other),
        }
    }
}
