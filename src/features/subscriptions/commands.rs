use super::export;
use super::models::{RawSubscriptionInput, Subscription, UpdateSubscriptionDto};
use super::service::{
    ConfirmationOutcome, PendingConfirmation, SubmitOutcome, SubscriptionService,
};
use super::view::{CategoryFilter, SortKey, View};
use crate::shared::database::KeyValueSlot;
use chrono::Local;
use std::path::{Path, PathBuf};

/// サブスクリプション一覧を取得する
///
/// # 引数
/// * `service` - サブスクリプションサービス
/// * `category` - カテゴリフィルタ（"ALL" は全件）
/// * `sort` - 並び順（未知の値は並べ替えなし）
///
/// # 戻り値
/// 表示用の一覧と合計
pub fn get_subscriptions<S: KeyValueSlot>(
    service: &mut SubscriptionService<S>,
    category: &str,
    sort: &str,
) -> View {
    service.set_filter(CategoryFilter::from_selection(category));
    service.set_sort(SortKey::from_selection(sort));
    service.view()
}

/// サブスクリプションを作成する
///
/// # 戻り値
/// 作成されたサブスクリプション、または失敗時はエラーメッセージ
pub fn create_subscription<S: KeyValueSlot>(
    service: &mut SubscriptionService<S>,
    input: RawSubscriptionInput,
) -> Result<Subscription, String> {
    // 編集モードが残っていると更新として扱われるため解除する
    service.cancel_edit();

    match service
        .submit(&input)
        .map_err(|e| e.report("サブスクリプションの作成"))?
    {
        SubmitOutcome::Created(created) => Ok(created),
        other => Err(format!("予期しない送信結果です: {other:?}")),
    }
}

/// サブスクリプションを更新する
///
/// # 引数
/// * `id` - サブスクリプションID
/// * `dto` - 上書きする項目
///
/// # 戻り値
/// 更新されたサブスクリプション。IDが存在しない場合はNone
pub fn update_subscription<S: KeyValueSlot>(
    service: &mut SubscriptionService<S>,
    id: &str,
    dto: UpdateSubscriptionDto,
) -> Result<Option<Subscription>, String> {
    // 編集フォームに現在の値を読み込む
    let Some(mut form) = service.begin_edit(id) else {
        return Ok(None);
    };
    dto.apply_to(&mut form);

    let outcome = service.submit(&form).map_err(|e| {
        service.cancel_edit();
        e.report("サブスクリプションの更新")
    })?;

    match outcome {
        SubmitOutcome::Updated(updated) => Ok(Some(updated)),
        SubmitOutcome::Unchanged => Ok(None),
        SubmitOutcome::Created(created) => Err(format!(
            "予期しない送信結果です: 作成されました id={}",
            created.id
        )),
    }
}

/// サブスクリプション削除の確認をリクエストする
///
/// # 戻り値
/// 確認待ちリクエスト。IDが存在しない場合はNone
pub fn request_subscription_deletion<S: KeyValueSlot>(
    service: &mut SubscriptionService<S>,
    id: &str,
) -> Option<PendingConfirmation> {
    service.request_delete(id)
}

/// 全件削除の確認をリクエストする
///
/// # 戻り値
/// 確認待ちリクエスト。一覧が空の場合はNone
pub fn request_clear_all_subscriptions<S: KeyValueSlot>(
    service: &mut SubscriptionService<S>,
) -> Option<PendingConfirmation> {
    service.request_clear_all()
}

/// 確認待ちの操作を確定またはキャンセルする
///
/// # 引数
/// * `token` - 確認トークン
/// * `accepted` - ユーザーが承認した場合はtrue
///
/// # 戻り値
/// 解決結果、または失敗時はエラーメッセージ
pub fn resolve_confirmation<S: KeyValueSlot>(
    service: &mut SubscriptionService<S>,
    token: &str,
    accepted: bool,
) -> Result<ConfirmationOutcome, String> {
    if !accepted {
        service.cancel(token);
        return Ok(ConfirmationOutcome::Cancelled);
    }

    service.confirm(token).map_err(|e| e.report("確認の実行"))
}

/// サブスクリプション一覧をCSVファイルにエクスポートする
///
/// # 引数
/// * `output` - 出力先（未指定の場合はカレントディレクトリに既定のファイル名で出力）
///
/// # 戻り値
/// 出力したファイルのパス、または失敗時はエラーメッセージ
pub fn export_subscriptions<S: KeyValueSlot>(
    service: &SubscriptionService<S>,
    output: Option<&Path>,
) -> Result<PathBuf, String> {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(export::default_file_name(Local::now().date_naive())));

    export::export_csv_file(service.subscriptions(), &path)
        .map_err(|e| e.report("CSVエクスポート"))?;

    Ok(path)
}
