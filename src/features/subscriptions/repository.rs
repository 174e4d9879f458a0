use super::models::{Subscription, CATEGORIES};
use super::validation::{sanitize_name, MIN_NAME_CHARS};
use crate::shared::database::KeyValueSlot;
use crate::shared::errors::{AppError, AppResult};
use std::collections::HashSet;

/// サブスクリプション一覧を永続化スロットから読み込む
///
/// # 引数
/// * `slot` - 永続化スロット
/// * `key` - スロットのキー
///
/// # 戻り値
/// サブスクリプションのリスト
///
/// キーが存在しない、空文字列、JSONとして不正、配列でない、または読み込みに
/// 失敗した場合は空のリストを返す（エラーにはしない）。
/// 不正な要素と重複したIDの要素は読み飛ばす。
pub fn load(slot: &dyn KeyValueSlot, key: &str) -> Vec<Subscription> {
    let raw = match slot.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("保存データの読み込みに失敗したため、空の一覧を使用します: {}", e.details());
            return Vec::new();
        }
    };

    if raw.trim().is_empty() {
        return Vec::new();
    }

    let items = match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(_) => {
            log::warn!("保存データが配列ではないため、空の一覧を使用します");
            return Vec::new();
        }
        Err(e) => {
            log::warn!("保存データのJSON解析に失敗したため、空の一覧を使用します: {e}");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut subscriptions = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let subscription = match serde_json::from_value::<Subscription>(item) {
            Ok(subscription) => subscription,
            Err(e) => {
                log::warn!("{index}番目のレコードを読み飛ばします: {e}");
                continue;
            }
        };

        if !is_well_formed(&subscription) {
            log::warn!("{index}番目のレコードが不正なため読み飛ばします: id={}", subscription.id);
            continue;
        }

        if !seen.insert(subscription.id.clone()) {
            log::warn!("重複したIDのレコードを読み飛ばします: id={}", subscription.id);
            continue;
        }

        subscriptions.push(subscription);
    }

    subscriptions
}

/// サブスクリプション一覧全体を永続化スロットに書き込む
///
/// # 引数
/// * `slot` - 永続化スロット
/// * `key` - スロットのキー
/// * `subscriptions` - 保存するサブスクリプション一覧
///
/// # 戻り値
/// 成功時はOk(())、失敗時は永続化エラー
pub fn save(
    slot: &mut dyn KeyValueSlot,
    key: &str,
    subscriptions: &[Subscription],
) -> AppResult<()> {
    let json = serde_json::to_string(subscriptions)?;

    slot.set(key, &json).map_err(|e| match e {
        AppError::Persistence(_) => e,
        other => AppError::persistence(other.details()),
    })?;

    log::debug!("{}件のサブスクリプションを保存しました", subscriptions.len());

    Ok(())
}

/// 保存済みレコードがレコードの不変条件を満たすかどうか
fn is_well_formed(subscription: &Subscription) -> bool {
    !subscription.id.trim().is_empty()
        && sanitize_name(&subscription.name).chars().count() >= MIN_NAME_CHARS
        && subscription.price.is_finite()
        && subscription.price >= 0.0
        && CATEGORIES.contains(&subscription.category.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::database::{MemorySlot, SqliteSlot};

    const KEY: &str = "subs";

    fn sample(id: &str, name: &str, price: f64) -> Subscription {
        Subscription {
            id: id.to_string(),
            name: name.to_string(),
            price,
            category: "Streaming".to_string(),
            service_key: Some("other".to_string()),
            icon: Some("🔖".to_string()),
            created_at: 100,
        }
    }

    fn slot_with(raw: &str) -> MemorySlot {
        let mut slot = MemorySlot::new();
        slot.set(KEY, raw).unwrap();
        slot
    }

    /// 常に書き込みに失敗するスロット
    struct BrokenSlot;

    impl KeyValueSlot for BrokenSlot {
        fn get(&self, _key: &str) -> AppResult<Option<String>> {
            Err(AppError::Database("database is locked".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> AppResult<()> {
            Err(AppError::Database("disk full".to_string()))
        }
    }

    #[test]
    fn test_load_missing_key() {
        assert!(load(&MemorySlot::new(), KEY).is_empty());
    }

    #[test]
    fn test_load_malformed_content() {
        for raw in ["", "   ", "not json", "{\"a\":1}", "42", "null", "[1, 2"] {
            assert!(load(&slot_with(raw), KEY).is_empty(), "raw {raw:?}");
        }
    }

    #[test]
    fn test_load_read_failure_is_empty() {
        assert!(load(&BrokenSlot, KEY).is_empty());
    }

    #[test]
    fn test_load_skips_invalid_and_duplicate_records() {
        let raw = r#"[
            {"id":"a","name":"Netflix","price":19.99,"category":"Streaming","createdAt":1},
            {"id":"b","name":"X","price":5,"category":"Streaming","createdAt":2},
            {"id":"c","name":"Spotify","price":-1,"category":"Müzik","createdAt":3},
            {"id":"d","name":"Spotify","price":9.99,"category":"","createdAt":4},
            {"id":"e","name":"Spotify","price":9.99,"category":"Podcast","createdAt":4},
            {"id":"a","name":"Duplicate","price":1,"category":"Streaming","createdAt":5},
            {"name":"No id"},
            "text"
        ]"#;
        let subs = load(&slot_with(raw), KEY);

        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].id, "a");
        assert_eq!(subs[0].name, "Netflix");
    }

    #[test]
    fn test_save_then_load() {
        let mut slot = SqliteSlot::in_memory().unwrap();
        let subs = vec![sample("a", "Netflix", 19.99), sample("b", "Spotify", 9.99)];

        save(&mut slot, KEY, &subs).unwrap();

        assert_eq!(load(&slot, KEY), subs);
    }

    fn stored_value(slot: &MemorySlot) -> serde_json::Value {
        serde_json::from_str(&slot.get(KEY).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_save_load_is_fixed_point() {
        // serviceKey / icon を持つレコードと持たない旧形式のレコード
        let raw = r#"[
            {"id":"a","name":"Netflix","price":19.99,"category":"Streaming","serviceKey":"netflix","icon":"🎬","createdAt":100},
            {"id":"b","name":"Spotify","price":9.99,"category":"Müzik","createdAt":200}
        ]"#;
        let mut slot = slot_with(raw);
        let before = stored_value(&slot);

        let loaded = load(&slot, KEY);
        save(&mut slot, KEY, &loaded).unwrap();

        assert_eq!(stored_value(&slot), before);
        assert!(stored_value(&slot)[1].get("serviceKey").is_none());

        let reloaded = load(&slot, KEY);
        save(&mut slot, KEY, &reloaded).unwrap();
        assert_eq!(stored_value(&slot), before);
    }

    #[test]
    fn test_save_failure_is_persistence_error() {
        let result = save(&mut BrokenSlot, KEY, &[sample("a", "Netflix", 1.0)]);
        assert!(matches!(result, Err(AppError::Persistence(_))));
    }
}
