use super::models::{RawSubscriptionInput, Subscription, SubscriptionFields};
use super::view::{self, CategoryFilter, SortKey, View};
use super::{mutations, repository, validation};
use crate::shared::database::KeyValueSlot;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::collation::Collator;
use chrono::Utc;
use uuid::Uuid;

/// 確認待ちの破壊的操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// 1件の削除
    Delete { id: String },
    /// 全件削除
    ClearAll,
}

/// 確認待ちリクエスト
///
/// 表示層は`prompt`をユーザーに提示し、`token`で確定またはキャンセルする
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub token: String,
    pub action: PendingAction,
    pub prompt: String,
}

/// 確認待ち操作の解決結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    /// 操作を実行した
    Performed(PendingAction),
    /// 対象のレコードが既に存在しないため何もしなかった
    AlreadyGone(PendingAction),
    /// ユーザーがキャンセルした
    Cancelled,
}

/// フォーム送信の結果
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Subscription),
    Updated(Subscription),
    /// 編集対象のレコードが既に存在しない（一覧は変更されない）
    Unchanged,
}

/// アプリケーション状態
///
/// 表示層はこの状態を直接変更せず、`SubscriptionService`の操作を通じて更新する
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub subscriptions: Vec<Subscription>,
    pub filter: CategoryFilter,
    pub sort: SortKey,
    /// 編集中のレコードID（編集モードでない場合はNone）
    pub editing_id: Option<String>,
    pub pending: Option<PendingConfirmation>,
}

/// サブスクリプション一覧の操作と永続化を行うサービス
///
/// 変更操作はすべて書き込みスルーで、スロットへの保存が成功した場合のみ
/// メモリ上の状態を更新する
pub struct SubscriptionService<S: KeyValueSlot> {
    slot: S,
    storage_key: String,
    collator: Box<dyn Collator>,
    state: AppState,
}

impl<S: KeyValueSlot> SubscriptionService<S> {
    /// スロットから一覧を読み込んでサービスを作成する
    ///
    /// # 引数
    /// * `slot` - 永続化スロット
    /// * `storage_key` - 一覧を保存するキー
    /// * `collator` - 名前順の比較に使用する戦略
    pub fn open(slot: S, storage_key: &str, collator: Box<dyn Collator>) -> Self {
        let subscriptions = repository::load(&slot, storage_key);
        log::info!(
            "{}件のサブスクリプションを読み込みました（ロケール: {}）",
            subscriptions.len(),
            collator.locale()
        );

        Self {
            slot,
            storage_key: storage_key.to_string(),
            collator,
            state: AppState {
                subscriptions,
                ..AppState::default()
            },
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.state.subscriptions
    }

    pub fn find(&self, id: &str) -> Option<&Subscription> {
        self.state.subscriptions.iter().find(|sub| sub.id == id)
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.state.filter = filter;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.state.sort = sort;
    }

    /// 現在のフィルタと並び順で表示用の一覧を作成する
    pub fn view(&self) -> View {
        view::derive_view(
            &self.state.subscriptions,
            &self.state.filter,
            self.state.sort,
            self.collator.as_ref(),
        )
    }

    /// 新しいサブスクリプションを作成する
    ///
    /// # 戻り値
    /// 作成されたサブスクリプション、またはバリデーション・永続化エラー
    pub fn create(&mut self, input: &RawSubscriptionInput) -> AppResult<Subscription> {
        let fields = validation::validate(input)?;
        self.create_validated(fields)
    }

    fn create_validated(&mut self, fields: SubscriptionFields) -> AppResult<Subscription> {
        let id = self.generate_id();
        let created_at = Utc::now().timestamp_millis();

        let next = mutations::create(&self.state.subscriptions, fields, id, created_at);
        let created = next[0].clone();
        self.commit(next)?;

        log::info!("サブスクリプションを作成しました: id={}, name={}", created.id, created.name);
        Ok(created)
    }

    /// サブスクリプションを更新する
    ///
    /// # 戻り値
    /// 更新後のサブスクリプション。IDが存在しない場合はNone（一覧は変更しない）
    pub fn update(
        &mut self,
        id: &str,
        input: &RawSubscriptionInput,
    ) -> AppResult<Option<Subscription>> {
        let fields = validation::validate(input)?;
        self.update_validated(id, fields)
    }

    fn update_validated(
        &mut self,
        id: &str,
        fields: SubscriptionFields,
    ) -> AppResult<Option<Subscription>> {
        if self.find(id).is_none() {
            log::debug!("更新対象が存在しないため何もしません: id={id}");
            return Ok(None);
        }

        let next = mutations::update(&self.state.subscriptions, id, fields);
        let updated = next.iter().find(|sub| sub.id == id).cloned();
        self.commit(next)?;

        log::info!("サブスクリプションを更新しました: id={id}");
        Ok(updated)
    }

    /// フォームを送信する
    ///
    /// 編集モードでは更新、それ以外は作成する。成功した場合は編集モードを終了する。
    /// バリデーションエラーの場合は状態を変更しない。
    pub fn submit(&mut self, input: &RawSubscriptionInput) -> AppResult<SubmitOutcome> {
        let fields = validation::validate(input)?;

        let outcome = match self.state.editing_id.clone() {
            Some(id) => match self.update_validated(&id, fields)? {
                Some(updated) => SubmitOutcome::Updated(updated),
                None => SubmitOutcome::Unchanged,
            },
            None => SubmitOutcome::Created(self.create_validated(fields)?),
        };

        self.state.editing_id = None;
        Ok(outcome)
    }

    /// サブスクリプションを削除する（確認なし）
    ///
    /// # 戻り値
    /// 削除した場合はtrue、存在しなかった場合はfalse
    pub fn delete(&mut self, id: &str) -> AppResult<bool> {
        if self.find(id).is_none() {
            return Ok(false);
        }

        let next = mutations::delete(&self.state.subscriptions, id);
        self.commit(next)?;

        if self.state.editing_id.as_deref() == Some(id) {
            self.state.editing_id = None;
        }

        log::info!("サブスクリプションを削除しました: id={id}");
        Ok(true)
    }

    /// すべてのサブスクリプションを削除する（確認なし）
    pub fn clear_all(&mut self) -> AppResult<()> {
        let count = self.state.subscriptions.len();
        self.commit(mutations::clear_all())?;
        self.state.editing_id = None;

        log::info!("{count}件のサブスクリプションをすべて削除しました");
        Ok(())
    }

    /// 編集モードを開始し、フォームの初期値を返す
    ///
    /// IDが存在しない場合はNone（編集モードは変更しない）
    pub fn begin_edit(&mut self, id: &str) -> Option<RawSubscriptionInput> {
        let input = self.find(id)?.to_input();
        self.state.editing_id = Some(id.to_string());
        Some(input)
    }

    /// 編集モードを終了する
    pub fn cancel_edit(&mut self) {
        self.state.editing_id = None;
    }

    /// 削除の確認をリクエストする
    ///
    /// IDが存在しない場合はNone。既存の確認待ちリクエストは置き換えられる
    pub fn request_delete(&mut self, id: &str) -> Option<PendingConfirmation> {
        let name = self.find(id)?.name.clone();
        Some(self.set_pending(
            PendingAction::Delete { id: id.to_string() },
            format!("\"{name}\" silinsin mi?"),
        ))
    }

    /// 全件削除の確認をリクエストする
    ///
    /// 一覧が空の場合はNone
    pub fn request_clear_all(&mut self) -> Option<PendingConfirmation> {
        if self.state.subscriptions.is_empty() {
            return None;
        }
        Some(self.set_pending(
            PendingAction::ClearAll,
            "Tüm abonelikler silinsin mi?".to_string(),
        ))
    }

    /// 確認待ちの操作を実行する
    ///
    /// # 戻り値
    /// 実行結果（削除対象が既に存在しない場合は`AlreadyGone`）、
    /// またはトークンが一致しない場合は確認エラー
    pub fn confirm(&mut self, token: &str) -> AppResult<ConfirmationOutcome> {
        let pending = self.take_pending(token)?;

        let performed = match &pending.action {
            PendingAction::Delete { id } => self.delete(id)?,
            PendingAction::ClearAll => {
                self.clear_all()?;
                true
            }
        };

        if performed {
            Ok(ConfirmationOutcome::Performed(pending.action))
        } else {
            log::debug!("確認済みの操作の対象が既に存在しません: {:?}", pending.action);
            Ok(ConfirmationOutcome::AlreadyGone(pending.action))
        }
    }

    /// 確認待ちの操作をキャンセルする
    ///
    /// # 戻り値
    /// キャンセルした場合はtrue、トークンが一致しない場合はfalse
    pub fn cancel(&mut self, token: &str) -> bool {
        self.take_pending(token).is_ok()
    }

    fn set_pending(&mut self, action: PendingAction, prompt: String) -> PendingConfirmation {
        let pending = PendingConfirmation {
            token: Uuid::new_v4().to_string(),
            action,
            prompt,
        };
        self.state.pending = Some(pending.clone());
        pending
    }

    fn take_pending(&mut self, token: &str) -> AppResult<PendingConfirmation> {
        match self.state.pending.take() {
            Some(pending) if pending.token == token => Ok(pending),
            other => {
                // 一致しない場合は元の確認待ちを残す
                self.state.pending = other;
                Err(AppError::confirmation(
                    "確認リクエストが見つからないか、既に処理されています",
                ))
            }
        }
    }

    /// 一覧を保存し、成功した場合のみメモリ上の状態を置き換える
    fn commit(&mut self, next: Vec<Subscription>) -> AppResult<()> {
        if let Err(e) = repository::save(&mut self.slot, &self.storage_key, &next) {
            log::error!("サブスクリプション一覧の保存に失敗しました: {}", e.details());
            return Err(e);
        }

        self.state.subscriptions = next;
        Ok(())
    }

    /// 一覧内で重複しないIDを生成する
    fn generate_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.find(&id).is_none() {
                return id;
            }
        }
    }
}
