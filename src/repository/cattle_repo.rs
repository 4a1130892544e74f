// ==========================================
// 奶牛场生产管理系统 - 奶牛档案仓储
// ==========================================
// 职责: 管理 cattle_master 表的 CRUD 操作
// 红线: 不含业务逻辑，只负责数据访问
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::cattle::CattleMaster;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// CattleRepository - 奶牛档案仓储
// ==========================================
pub struct CattleRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CattleRepository {
    /// 创建新的 CattleRepository 实例
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

    /// 插入或更新档案（INSERT OR REPLACE, upsert 语义）
    pub fn upsert(&self, cattle: &CattleMaster) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO cattle_master (
                cattle_id, tag_no, name, breed, birth_date, notes,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                cattle.cattle_id,
                cattle.tag_no,
                cattle.name,
                cattle.breed,
                cattle.birth_date.map(|d| d.to_string()),
                cattle.notes,
                cattle.created_at.to_rfc3339(),
                cattle.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// 按 cattle_id 查询档案
    pub fn find_by_id(&self, cattle_id: &str) -> RepositoryResult<Option<CattleMaster>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("{} WHERE cattle_id = ?1", Self::SELECT_BASE))?;

        let mut rows = stmt.query_map(params![cattle_id], Self::map_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// 查询全部档案, 按耳标号升序
    pub fn list_all(&self) -> RepositoryResult<Vec<CattleMaster>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY tag_no ASC", Self::SELECT_BASE))?;

        let rows = stmt.query_map([], Self::map_row)?;
        let mut cattle = Vec::new();
        for row in rows {
            cattle.push(row?);
        }
        Ok(cattle)
    }

    /// 删除档案
    pub fn delete(&self, cattle_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM cattle_master WHERE cattle_id = ?1",
            params![cattle_id],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "CattleMaster".to_string(),
                id: cattle_id.to_string(),
            });
        }
        Ok(())
    }

    // ==========================================
    // 行映射
    // ==========================================

    const SELECT_BASE: &'static str = r#"
        SELECT cattle_id, tag_no, name, breed, birth_date, notes,
               created_at, updated_at
        FROM cattle_master
    "#;

    fn map_row(row: &Row<'_>) -> rusqlite::Result<CattleMaster> {
        let birth_date: Option<NaiveDate> = row.get(4)?;
        let created_at: DateTime<Utc> = row.get(6)?;
        let updated_at: DateTime<Utc> = row.get(7)?;

        Ok(CattleMaster {
            cattle_id: row.get(0)?,
            tag_no: row.get(1)?,
            name: row.get(2)?,
            breed: row.get(3)?,
            birth_date,
            notes: row.get(5)?,
            created_at,
            updated_at,
        })
    }
}
