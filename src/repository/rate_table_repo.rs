// ==========================================
// 奶牛场生产管理系统 - 收购价率表仓储
// ==========================================
// 职责: 管理 rate_table 表的数据访问
// 口径: 键为 (fat_bp, snf_bp) 基点整数对
// 红线: 不含业务逻辑，只负责数据访问
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::rate::{pct_to_basis_points, RateEntry, RateTable};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// RateTableRepository - 价率表仓储
// ==========================================
pub struct RateTableRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RateTableRepository {
    /// 创建新的 RateTableRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 整表替换（事务: 清空后批量写入）
    ///
    /// 价率表由采购方整表下发, 无逐条增量更新的业务场景
    pub fn replace_all(&self, entries: &[RateEntry]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        tx.execute("DELETE FROM rate_table", [])?;

        let mut count = 0;
        for entry in entries {
            let (fat_bp, snf_bp) = entry.key();
            tx.execute(
                r#"
                INSERT OR REPLACE INTO rate_table (fat_bp, snf_bp, rate_per_liter, updated_at)
                VALUES (?1, ?2, ?3, datetime('now'))
                "#,
                params![fat_bp, snf_bp, entry.rate_per_liter],
            )?;
            count += 1;
        }

        tx.commit()?;
        Ok(count)
    }

    /// 精确查找 (fat, snf) 的每升价
    ///
    /// # 返回
    /// - Ok(Some(f64)): 命中
    /// - Ok(None): 未命中（调用方按“未知价”处理）
    pub fn find_rate(&self, fat_pct: f64, snf_pct: f64) -> RepositoryResult<Option<f64>> {
        let conn = self.get_conn()?;
        let rate = conn
            .query_row(
                "SELECT rate_per_liter FROM rate_table WHERE fat_bp = ?1 AND snf_bp = ?2",
                params![pct_to_basis_points(fat_pct), pct_to_basis_points(snf_pct)],
                |row| row.get::<_, f64>(0),
            )
            .optional()?;
        Ok(rate)
    }

    /// 读取整表（fat 升序, snf 升序）
    pub fn load_table(&self) -> RepositoryResult<RateTable> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT fat_bp, snf_bp, rate_per_liter
            FROM rate_table
            ORDER BY fat_bp ASC, snf_bp ASC
            "#,
        )?;

        let rows = stmt.query_map([], Self::map_row)?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(RateTable::new(entries))
    }

    // ==========================================
    // 行映射
    // ==========================================

    fn map_row(row: &Row<'_>) -> rusqlite::Result<RateEntry> {
        let fat_bp: i64 = row.get(0)?;
        let snf_bp: i64 = row.get(1)?;
        Ok(RateEntry {
            fat_pct: fat_bp as f64 / 100.0,
            snf_pct: snf_bp as f64 / 100.0,
            rate_per_liter: row.get(2)?,
        })
    }
}
