use crate::shared::errors::{AppError, AppResult};
use chrono::Utc;
use chrono_tz::Europe::Istanbul;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;

/// 文字列キーで値を読み書きする永続化スロット
///
/// 値は常に丸ごと上書きされる（部分書き込みはない）
pub trait KeyValueSlot {
    /// キーに対応する値を取得する（存在しない場合はNone）
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// キーに対応する値を上書き保存する
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
}

/// SQLiteの`kv_store`テーブルを使用するスロット
pub struct SqliteSlot {
    conn: Connection,
}

impl SqliteSlot {
    /// 既存の接続からスロットを作成する（テーブルがなければ作成）
    pub fn new(conn: Connection) -> AppResult<Self> {
        create_tables(&conn)?;
        Ok(Self { conn })
    }

    /// インメモリデータベースでスロットを作成する
    pub fn in_memory() -> AppResult<Self> {
        Self::new(Connection::open_in_memory()?)
    }
}

impl KeyValueSlot for SqliteSlot {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| AppError::Database(e.to_string()))
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        // イスタンブール時間で現在時刻を取得
        let now = Utc::now().with_timezone(&Istanbul).to_rfc3339();

        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )
            .map_err(|e| AppError::persistence(format!("{key}: {e}")))?;

        Ok(())
    }
}

/// メモリ上のスロット（テストや組み込み用途）
#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    values: HashMap<String, String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueSlot for MemorySlot {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// データベース接続を初期化し、スロットを返す
///
/// # 引数
/// * `database_path` - データベースファイルのパス
///
/// # 処理内容
/// 1. 親ディレクトリの確保
/// 2. データベース接続の開設
/// 3. テーブル作成
pub fn initialize_database(database_path: &Path) -> AppResult<SqliteSlot> {
    if let Some(parent) = database_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::configuration(format!("データディレクトリの作成に失敗: {e}"))
            })?;
            log::info!("データディレクトリを作成: {parent:?}");
        }
    }

    let conn = Connection::open(database_path)?;
    let slot = SqliteSlot::new(conn)?;

    log::info!("データベースを初期化しました: {database_path:?}");

    Ok(slot)
}

/// キーバリューテーブルを作成する
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}
