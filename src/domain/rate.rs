// ==========================================
// 奶牛场生产管理系统 - 收购价率表领域模型
// ==========================================
// 用途: 按 (脂肪率, 非脂乳固体率) 精确匹配每升收购价
// 口径: 查不到返回 0（调用方把 0 视为“未知价”，
//       业务上不存在真实的零价牛奶）
// ==========================================

use serde::{Deserialize, Serialize};

/// 百分率 → 基点（0.01%）
///
/// f64 直接做键不可靠，价率表统一用基点整数做键，
/// 4.5 / 8.5 这类字面量可精确命中
pub fn pct_to_basis_points(pct: f64) -> i64 {
    (pct * 100.0).round() as i64
}

// ==========================================
// RateEntry - 价率表条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    pub fat_pct: f64,        // 脂肪率（%）
    pub snf_pct: f64,        // 非脂乳固体率（%）
    pub rate_per_liter: f64, // 每升收购价
}

impl RateEntry {
    /// 基点键（fat_bp, snf_bp）
    pub fn key(&self) -> (i64, i64) {
        (
            pct_to_basis_points(self.fat_pct),
            pct_to_basis_points(self.snf_pct),
        )
    }
}

// ==========================================
// RateTable - 价率表
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateTable {
    entries: Vec<RateEntry>,
}

impl RateTable {
    /// 从条目列表构建（后出现的同键条目覆盖先出现的）
    pub fn new(entries: Vec<RateEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RateEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 精确查找 (fat, snf) 对应条目
    ///
    /// 同键多条时取最后一条（与“后导入覆盖先导入”的口径一致）
    pub fn find(&self, fat_pct: f64, snf_pct: f64) -> Option<&RateEntry> {
        let key = (pct_to_basis_points(fat_pct), pct_to_basis_points(snf_pct));
        self.entries.iter().rev().find(|e| e.key() == key)
    }
}
