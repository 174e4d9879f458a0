/// データベース接続とキーバリュースロット
pub mod connection;

pub use connection::{create_tables, initialize_database, KeyValueSlot, MemorySlot, SqliteSlot};
