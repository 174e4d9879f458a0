/// テーマ設定機能モジュール
///
/// ライト/ダークテーマの設定を永続化スロットに保存する
pub mod models;
pub mod repository;

pub use models::Theme;
pub use repository::{load_theme, save_theme, toggle_theme};
