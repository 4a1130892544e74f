// ==========================================
// 奶牛场生产管理系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 班次 (Shift)
// ==========================================
// 产奶记录的最小录入单位: 早班挤奶 / 晚班挤奶
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shift {
    Morning, // 早班
    Evening, // 晚班
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shift::Morning => write!(f, "MORNING"),
            Shift::Evening => write!(f, "EVENING"),
        }
    }
}

impl Shift {
    /// 从字符串解析班次（兼容中英文别名）
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "MORNING" | "AM" | "早班" | "早" => Some(Shift::Morning),
            "EVENING" | "PM" | "晚班" | "晚" => Some(Shift::Evening),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Shift::Morning => "MORNING",
            Shift::Evening => "EVENING",
        }
    }
}

// ==========================================
// 奶牛引用 (Cattle Reference)
// ==========================================
// 上游数据中 cattleId 有两种形态:
// - 裸字符串 ID
// - 引用对象（ID + 耳标显示号）
// 统计边界处统一归一化为纯 ID 再分组
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CattleRef {
    /// 裸 ID
    RawId(String),
    /// 引用对象（含耳标显示号）
    Reference {
        cattle_id: String,
        display_tag: Option<String>,
    },
}

impl CattleRef {
    /// 归一化为纯 ID
    pub fn cattle_id(&self) -> &str {
        match self {
            CattleRef::RawId(id) => id,
            CattleRef::Reference { cattle_id, .. } => cattle_id,
        }
    }

    /// 显示用耳标号（引用对象携带时优先，否则退回 ID）
    pub fn display_tag(&self) -> &str {
        match self {
            CattleRef::RawId(id) => id,
            CattleRef::Reference {
                cattle_id,
                display_tag,
            } => display_tag.as_deref().unwrap_or(cattle_id),
        }
    }
}

impl From<&str> for CattleRef {
    fn from(id: &str) -> Self {
        CattleRef::RawId(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_from_str_别名() {
        assert_eq!(Shift::from_str("morning"), Some(Shift::Morning));
        assert_eq!(Shift::from_str("早班"), Some(Shift::Morning));
        assert_eq!(Shift::from_str("EVENING"), Some(Shift::Evening));
        assert_eq!(Shift::from_str("晚"), Some(Shift::Evening));
        assert_eq!(Shift::from_str("noon"), None);
    }

    #[test]
    fn test_cattle_ref_归一化() {
        let raw = CattleRef::RawId("C001".to_string());
        assert_eq!(raw.cattle_id(), "C001");
        assert_eq!(raw.display_tag(), "C001");

        let reference = CattleRef::Reference {
            cattle_id: "C002".to_string(),
            display_tag: Some("花花-12".to_string()),
        };
        assert_eq!(reference.cattle_id(), "C002");
        assert_eq!(reference.display_tag(), "花花-12");

        let bare_reference = CattleRef::Reference {
            cattle_id: "C003".to_string(),
            display_tag: None,
        };
        assert_eq!(bare_reference.display_tag(), "C003");
    }

    #[test]
    fn test_cattle_ref_untagged_反序列化() {
        let raw: CattleRef = serde_json::from_str(r#""C001""#).unwrap();
        assert_eq!(raw, CattleRef::RawId("C001".to_string()));

        let reference: CattleRef =
            serde_json::from_str(r#"{"cattle_id":"C002","display_tag":"T-7"}"#).unwrap();
        assert_eq!(reference.cattle_id(), "C002");
    }
}
