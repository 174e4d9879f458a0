/// サブスクリプション機能モジュール
///
/// このモジュールは、サブスクリプション管理に関連するすべての機能を提供します：
/// - フォーム入力のバリデーションと正規化
/// - サブスクリプションの作成、更新、削除、全件削除
/// - 永続化スロットへの読み書き
/// - カテゴリフィルタ・並べ替えと合計金額の計算
/// - サービスプリセットとCSVエクスポート
pub mod commands;
pub mod export;
pub mod models;
pub mod mutations;
pub mod presets;
pub mod repository;
pub mod service;
pub mod validation;
pub mod view;

#[cfg(test)]
mod integration_tests;

// 公開インターフェース
pub use commands::{
    create_subscription, export_subscriptions, get_subscriptions,
    request_clear_all_subscriptions, request_subscription_deletion, resolve_confirmation,
    update_subscription,
};

pub use models::{
    PriceInput, RawSubscriptionInput, Subscription, SubscriptionFields, UpdateSubscriptionDto,
    CATEGORIES,
};

pub use presets::{find_preset, prefill, ServicePreset, PRESETS};

pub use service::{
    AppState, ConfirmationOutcome, PendingAction, PendingConfirmation, SubmitOutcome,
    SubscriptionService,
};

pub use validation::validate;

pub use view::{compute_totals, derive_view, CategoryFilter, SortKey, Totals, View};
