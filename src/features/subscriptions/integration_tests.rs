// ディスク上のSQLiteスロットを使った一連の操作のテスト

use super::models::RawSubscriptionInput;
use super::repository;
use super::service::SubscriptionService;
use super::view::{CategoryFilter, SortKey};
use crate::shared::database::{initialize_database, KeyValueSlot, SqliteSlot};
use crate::shared::errors::AppError;
use crate::shared::utils::collation::collator_for;
use std::path::Path;
use tempfile::TempDir;

const KEY: &str = "herewecoding_subscriptions_v1";

fn open(path: &Path) -> SubscriptionService<SqliteSlot> {
    let slot = initialize_database(path).unwrap();
    SubscriptionService::open(slot, KEY, collator_for("tr-TR"))
}

#[test]
fn test_records_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("subs.db");

    let created = {
        let mut service = open(&db_path);
        service
            .create(&RawSubscriptionInput::new("Netflix", 19.99, "Streaming").with_service("netflix"))
            .unwrap();
        service
            .create(&RawSubscriptionInput::new("İnternet  Paketi", "0", "Diğer"))
            .unwrap()
    };

    let service = open(&db_path);

    assert_eq!(service.subscriptions().len(), 2);
    assert_eq!(service.subscriptions()[0], created);
    assert_eq!(created.name, "İnternet Paketi");
    assert_eq!(service.subscriptions()[1].icon(), "🎬");
}

#[test]
fn test_malformed_slot_starts_empty_and_recovers() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("subs.db");

    {
        let mut slot = initialize_database(&db_path).unwrap();
        slot.set(KEY, "not json").unwrap();
    }

    let mut service = open(&db_path);
    assert!(service.subscriptions().is_empty());

    // 次の変更で正しい内容に上書きされる
    service
        .create(&RawSubscriptionInput::new("Spotify", 9.99, "Müzik"))
        .unwrap();
    let slot = initialize_database(&db_path).unwrap();
    assert_eq!(repository::load(&slot, KEY).len(), 1);
}

#[test]
fn test_full_pipeline_view() {
    let temp_dir = TempDir::new().unwrap();
    let mut service = open(&temp_dir.path().join("subs.db"));

    for (name, price, category) in [
        ("Spotify", "9.99", "Müzik"),
        ("Netflix", "19.99", "Streaming"),
        ("Şahane Dizi", "19.99", "Streaming"),
        ("Çizgi Kanal", "4.50", "Streaming"),
    ] {
        service
            .create(&RawSubscriptionInput::new(name, price, category))
            .unwrap();
    }

    service.set_filter(CategoryFilter::from_selection("Streaming"));
    service.set_sort(SortKey::NameAsc);
    let names: Vec<String> = service.view().items.into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Çizgi Kanal", "Netflix", "Şahane Dizi"]);

    // 同額の場合は一覧の順序（新しい順に先頭追加）を保つ
    service.set_sort(SortKey::PriceDesc);
    let names: Vec<String> = service.view().items.into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Şahane Dizi", "Netflix", "Çizgi Kanal"]);

    let totals = service.view().totals;
    assert!((totals.monthly_total - 54.47).abs() < 1e-9);
    assert!((totals.yearly_total - 54.47 * 12.0).abs() < 1e-9);
}

#[test]
fn test_validation_failure_does_not_touch_disk() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("subs.db");
    let mut service = open(&db_path);

    let result = service.create(&RawSubscriptionInput::new("N", "-1", "X"));

    assert!(matches!(result, Err(AppError::Validation(_))));
    let slot = initialize_database(&db_path).unwrap();
    assert_eq!(slot.get(KEY).unwrap(), None);
}
