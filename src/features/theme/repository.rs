use super::models::Theme;
use crate::shared::database::KeyValueSlot;
use crate::shared::errors::AppResult;

/// 保存済みのテーマを読み込む
///
/// 未保存・読み込み失敗・未知の値の場合はライトテーマ
pub fn load_theme(slot: &dyn KeyValueSlot, key: &str) -> Theme {
    match slot.get(key) {
        Ok(Some(value)) => Theme::from_stored(&value).unwrap_or_else(|| {
            log::warn!("未知のテーマ設定のため既定値を使用します: {value}");
            Theme::default()
        }),
        Ok(None) => Theme::default(),
        Err(e) => {
            log::warn!("テーマ設定の読み込みに失敗しました: {}", e.details());
            Theme::default()
        }
    }
}

/// テーマを保存する
pub fn save_theme(slot: &mut dyn KeyValueSlot, key: &str, theme: Theme) -> AppResult<()> {
    slot.set(key, theme.as_str())
}

/// テーマを切り替えて保存する
///
/// # 戻り値
/// 切り替え後のテーマ
pub fn toggle_theme(slot: &mut dyn KeyValueSlot, key: &str) -> AppResult<Theme> {
    let next = load_theme(slot, key).toggled();
    save_theme(slot, key, next)?;

    log::info!("テーマを切り替えました: {}", next.as_str());
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::database::{MemorySlot, SqliteSlot};

    #[test]
    fn test_default_theme() {
        assert_eq!(load_theme(&MemorySlot::new(), "theme"), Theme::Light);
    }

    #[test]
    fn test_unknown_value_falls_back() {
        let mut slot = MemorySlot::new();
        slot.set("theme", "{\"x\":1}").unwrap();
        assert_eq!(load_theme(&slot, "theme"), Theme::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let mut slot = SqliteSlot::in_memory().unwrap();

        assert_eq!(toggle_theme(&mut slot, "theme").unwrap(), Theme::Dark);
        assert_eq!(load_theme(&slot, "theme"), Theme::Dark);
        assert_eq!(slot.get("theme").unwrap().as_deref(), Some("dark"));

        assert_eq!(toggle_theme(&mut slot, "theme").unwrap(), Theme::Light);
    }
}
