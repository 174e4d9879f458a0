// サブスクリプション一覧に対する純粋な変更操作
//
// どの関数も現在の一覧を受け取り、新しい一覧を返す。永続化は呼び出し側が行う。

use super::models::{Subscription, SubscriptionFields};

/// 新しいレコードを一覧の先頭に追加する
pub fn create(
    subscriptions: &[Subscription],
    fields: SubscriptionFields,
    id: String,
    created_at: i64,
) -> Vec<Subscription> {
    let mut out = Vec::with_capacity(subscriptions.len() + 1);
    out.push(Subscription::from_fields(id, created_at, fields));
    out.extend_from_slice(subscriptions);
    out
}

/// IDが一致するレコードのフィールドを置き換える
///
/// id と createdAt は変更しない。一致するレコードがない場合は同じ内容の一覧を返す
pub fn update(
    subscriptions: &[Subscription],
    id: &str,
    fields: SubscriptionFields,
) -> Vec<Subscription> {
    subscriptions
        .iter()
        .map(|sub| {
            let mut sub = sub.clone();
            if sub.id == id {
                sub.apply(fields.clone());
            }
            sub
        })
        .collect()
}

/// IDが一致するレコードを削除する（存在しない場合は何もしない）
pub fn delete(subscriptions: &[Subscription], id: &str) -> Vec<Subscription> {
    subscriptions
        .iter()
        .filter(|sub| sub.id != id)
        .cloned()
        .collect()
}

/// すべてのレコードを削除する
pub fn clear_all() -> Vec<Subscription> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn fields(name: &str, price: f64) -> SubscriptionFields {
        SubscriptionFields {
            name: name.to_string(),
            price,
            category: "Streaming".to_string(),
            service_key: "other".to_string(),
            icon: "🔖".to_string(),
        }
    }

    fn store(n: usize) -> Vec<Subscription> {
        (0..n).fold(Vec::new(), |acc, i| {
            create(&acc, fields(&format!("Sub {i}"), i as f64), format!("id-{i}"), i as i64)
        })
    }

    #[test]
    fn test_create_prepends() {
        let subs = store(2);
        let subs = create(&subs, fields("Netflix", 19.99), "new".to_string(), 500);

        assert_eq!(subs.len(), 3);
        assert_eq!(subs[0].id, "new");
        assert_eq!(subs[0].created_at, 500);
        assert_eq!(subs[1].id, "id-1");
        assert_eq!(subs[2].id, "id-0");
    }

    #[test]
    fn test_update_keeps_identity() {
        let subs = store(3);
        let updated = update(&subs, "id-1", fields("Renamed", 42.0));

        assert_eq!(updated[1].id, "id-1");
        assert_eq!(updated[1].created_at, 1);
        assert_eq!(updated[1].name, "Renamed");
        assert_eq!(updated[1].price, 42.0);
        assert_eq!(updated[0], subs[0]);
        assert_eq!(updated[2], subs[2]);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let subs = store(3);
        assert_eq!(update(&subs, "nonexistent-id", fields("X Y", 1.0)), subs);
    }

    #[test]
    fn test_delete() {
        let subs = store(3);
        let remaining = delete(&subs, "id-1");

        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|s| s.id != "id-1"));
        assert_eq!(delete(&subs, "missing"), subs);
    }

    #[test]
    fn test_clear_all() {
        assert!(clear_all().is_empty());
    }

    #[quickcheck]
    fn prop_delete_is_idempotent(n: u8, target: u8) -> bool {
        let subs = store(usize::from(n % 16));
        let id = format!("id-{}", target % 20);

        let once = delete(&subs, &id);
        let twice = delete(&once, &id);
        once == twice
    }
}
