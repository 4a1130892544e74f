// ==========================================
// 奶牛场生产管理系统 - 奶牛档案领域模型
// ==========================================
// 用途: 导入层/录入层写入, 统计层只读
// 对齐: cattle_master 表
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// CattleMaster - 奶牛档案主数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CattleMaster {
    // ===== 主键 =====
    pub cattle_id: String, // 奶牛唯一标识

    // ===== 基础信息 =====
    pub tag_no: String,              // 耳标号
    pub name: Option<String>,        // 牛名
    pub breed: Option<String>,       // 品种
    pub birth_date: Option<NaiveDate>, // 出生日期
    pub notes: Option<String>,       // 备注

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
    pub updated_at: DateTime<Utc>, // 记录更新时间
}

impl CattleMaster {
    /// 创建新档案（审计字段取当前时间）
    pub fn new(cattle_id: impl Into<String>, tag_no: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            cattle_id: cattle_id.into(),
            tag_no: tag_no.into(),
            name: None,
            breed: None,
            birth_date: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}
