// ==========================================
// 奶牛场生产管理系统 - 产奶记录仓储
// ==========================================
// 职责: 管理 milk_record 表的 CRUD 操作
// 红线: 不含业务逻辑，只负责数据访问
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::milk::MilkRecord;
use crate::domain::types::{CattleRef, Shift};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// MilkRecordRepository - 产奶记录仓储
// ==========================================
pub struct MilkRecordRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MilkRecordRepository {
    /// 创建新的 MilkRecordRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
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

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 插入单条产奶记录
    pub fn insert(&self, record: &MilkRecord) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        Self::insert_with_conn(&conn, record)?;
        Ok(())
    }

    /// 批量插入产奶记录（事务保证原子性）
    ///
    /// # 返回
    /// - Ok(usize): 成功插入的记录数
    pub fn batch_insert(&self, records: &[MilkRecord]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for record in records {
            Self::insert_with_conn(&tx, record)?;
            count += 1;
        }

        tx.commit()?;
        Ok(count)
    }

    fn insert_with_conn(conn: &Connection, record: &MilkRecord) -> RepositoryResult<()> {
        let display_tag = match &record.cattle {
            CattleRef::RawId(_) => None,
            CattleRef::Reference { display_tag, .. } => display_tag.clone(),
        };

        conn.execute(
            r#"
            INSERT INTO milk_record (
                record_id, cattle_id, cattle_display_tag, record_date, shift,
                morning_amount_l, evening_amount_l, notes,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                record.record_id,
                record.cattle.cattle_id(),
                display_tag,
                record.record_date.to_string(),
                record.shift.to_db_str(),
                record.morning_amount_l,
                record.evening_amount_l,
                record.notes,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// 按记录 ID 查询
    pub fn find_by_id(&self, record_id: &str) -> RepositoryResult<Option<MilkRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE record_id = ?1",
            Self::SELECT_BASE
        ))?;

        let mut rows = stmt.query_map(params![record_id], Self::map_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// 按日期范围查询（两端含, None 端不设界）, 按日期升序
    pub fn find_by_date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RepositoryResult<Vec<MilkRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE (?1 IS NULL OR record_date >= ?1)
               AND (?2 IS NULL OR record_date <= ?2)
             ORDER BY record_date ASC, created_at ASC",
            Self::SELECT_BASE
        ))?;

        let rows = stmt.query_map(
            params![
                start.map(|d| d.to_string()),
                end.map(|d| d.to_string())
            ],
            Self::map_row,
        )?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// 按奶牛查询（可选日期范围）, 按日期升序
    pub fn find_by_cattle(
        &self,
        cattle_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RepositoryResult<Vec<MilkRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE cattle_id = ?1
               AND (?2 IS NULL OR record_date >= ?2)
               AND (?3 IS NULL OR record_date <= ?3)
             ORDER BY record_date ASC, created_at ASC",
            Self::SELECT_BASE
        ))?;

        let rows = stmt.query_map(
            params![
                cattle_id,
                start.map(|d| d.to_string()),
                end.map(|d| d.to_string())
            ],
            Self::map_row,
        )?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// 查询全部记录, 按日期升序
    pub fn list_all(&self) -> RepositoryResult<Vec<MilkRecord>> {
        self.find_by_date_range(None, None)
    }

    /// 删除记录
    ///
    /// # 返回
    /// - Err(RepositoryError::NotFound): 记录不存在
    pub fn delete(&self, record_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM milk_record WHERE record_id = ?1",
            params![record_id],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "MilkRecord".to_string(),
                id: record_id.to_string(),
            });
        }
        Ok(())
    }

    /// 记录总数
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM milk_record", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ==========================================
    // 行映射
    // ==========================================

    const SELECT_BASE: &'static str = r#"
        SELECT record_id, cattle_id, cattle_display_tag, record_date, shift,
               morning_amount_l, evening_amount_l, notes,
               created_at, updated_at
        FROM milk_record
    "#;

    fn map_row(row: &Row<'_>) -> rusqlite::Result<MilkRecord> {
        let cattle_id: String = row.get(1)?;
        let display_tag: Option<String> = row.get(2)?;

        // 有耳标显示号时还原为引用对象, 否则为裸 ID
        let cattle = match display_tag {
            Some(tag) => CattleRef::Reference {
                cattle_id,
                display_tag: Some(tag),
            },
            None => CattleRef::RawId(cattle_id),
        };

        let record_date: NaiveDate = row.get(3)?;
        let shift_str: String = row.get(4)?;
        let shift = Shift::from_str(&shift_str).unwrap_or(Shift::Morning);

        let created_at: DateTime<Utc> = row.get(8)?;
        let updated_at: DateTime<Utc> = row.get(9)?;

        Ok(MilkRecord {
            record_id: row.get(0)?,
            cattle,
            record_date,
            shift,
            morning_amount_l: row.get(5)?,
            evening_amount_l: row.get(6)?,
            notes: row.get(7)?,
            created_at,
            updated_at,
        })
    }
}
