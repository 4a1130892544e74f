// ==========================================
// 奶牛场生产管理系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::engine::aggregation::DEFAULT_TREND_WINDOW_DAYS;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 配置键: 牧场名称
pub const KEY_FARM_NAME: &str = "farm.name";
/// 配置键: 界面语言
pub const KEY_LOCALE: &str = "app.locale";
/// 配置键: 趋势窗口天数
pub const KEY_TREND_WINDOW_DAYS: &str = "dashboard.trend_window_days";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }
        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值（upsert）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    // ==========================================
    // 类型化配置读取（带默认值）
    // ==========================================

    /// 牧场名称（默认: 示范牧场）
    pub fn get_farm_name(&self) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(KEY_FARM_NAME)?
            .unwrap_or_else(|| "示范牧场".to_string()))
    }

    /// 界面语言（默认: zh-CN）
    pub fn get_locale(&self) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(KEY_LOCALE)?
            .unwrap_or_else(|| "zh-CN".to_string()))
    }

    /// 趋势窗口天数（默认: 7; 非法存值回退默认并告警）
    pub fn get_trend_window_days(&self) -> Result<usize, Box<dyn Error>> {
        match self.get_config_value(KEY_TREND_WINDOW_DAYS)? {
            None => Ok(DEFAULT_TREND_WINDOW_DAYS),
            Some(raw) => match raw.parse::<usize>() {
                Ok(days) if days > 0 => Ok(days),
                _ => {
                    tracing::warn!("趋势窗口配置非法: {}, 回退默认 {}", raw, DEFAULT_TREND_WINDOW_DAYS);
                    Ok(DEFAULT_TREND_WINDOW_DAYS)
                }
            },
        }
    }

    /// 设置趋势窗口天数
    pub fn set_trend_window_days(&self, days: usize) -> Result<(), Box<dyn Error>> {
        self.set_global_config_value(KEY_TREND_WINDOW_DAYS, &days.to_string())
    }
}
