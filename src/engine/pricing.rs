// ==========================================
// 奶牛场生产管理系统 - 收购定价引擎
// ==========================================
// 职责: 按 (脂肪率, 非脂乳固体率) 查每升收购价
// 红线: Engine 不拼 SQL; 价率表由调用方提供
// ==========================================

use crate::domain::rate::RateTable;

// ==========================================
// PricingEngine - 收购定价引擎
// ==========================================
pub struct PricingEngine {
    // 无状态引擎,不需要注入依赖
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PricingEngine {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 查询每升收购价
    ///
    /// # 参数
    /// - `table`: 价率表
    /// - `fat_pct`: 脂肪率（%）
    /// - `snf_pct`: 非脂乳固体率（%）
    ///
    /// # 返回
    /// 精确命中时返回表中存储的价; 未命中返回 0.0。
    /// 调用方必须把 0 解释为“未知价”——业务上不存在零价牛奶
    pub fn rate_for(&self, table: &RateTable, fat_pct: f64, snf_pct: f64) -> f64 {
        table
            .find(fat_pct, snf_pct)
            .map(|e| e.rate_per_liter)
            .unwrap_or(0.0)
    }

    /// 估算一批奶的收购金额
    ///
    /// 价率未知（0）时金额同样为 0, 由调用方提示人工定价
    pub fn batch_value(&self, table: &RateTable, fat_pct: f64, snf_pct: f64, liters: f64) -> f64 {
        self.rate_for(table, fat_pct, snf_pct) * liters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rate::RateEntry;

    fn sample_table() -> RateTable {
        RateTable::new(vec![
            RateEntry {
                fat_pct: 4.5,
                snf_pct: 8.5,
                rate_per_liter: 32.5,
            },
            RateEntry {
                fat_pct: 3.5,
                snf_pct: 8.0,
                rate_per_liter: 28.0,
            },
        ])
    }

    #[test]
    fn test_rate_for_精确命中() {
        let engine = PricingEngine::new();
        assert_eq!(engine.rate_for(&sample_table(), 4.5, 8.5), 32.5);
    }

    #[test]
    fn test_rate_for_未命中返回零() {
        let engine = PricingEngine::new();
        assert_eq!(engine.rate_for(&sample_table(), 9.9, 9.9), 0.0);
    }

    #[test]
    fn test_batch_value() {
        let engine = PricingEngine::new();
        assert_eq!(engine.batch_value(&sample_table(), 3.5, 8.0, 100.0), 2800.0);
        assert_eq!(engine.batch_value(&sample_table(), 9.9, 9.9, 100.0), 0.0);
    }
}
