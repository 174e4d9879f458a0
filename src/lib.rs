pub mod features;
pub mod shared;

use features::subscriptions::SubscriptionService;
use log::info;
use shared::config::{initialize_logging_system, load_environment_variables, EnvironmentConfig};
use shared::database::{initialize_database, SqliteSlot};
use shared::errors::AppResult;
use shared::utils::collation::collator_for;

/// アプリケーションを初期化し、環境設定を返す
///
/// # 処理内容
/// 1. .envファイルの読み込み
/// 2. 環境設定の取得
/// 3. ログシステムの初期化
pub fn initialize_application() -> EnvironmentConfig {
    load_environment_variables();

    let env_config = EnvironmentConfig::from_env();
    initialize_logging_system(&env_config);

    info!(
        "アプリケーション初期化: data_dir={:?}, storage_key={}",
        env_config.data_dir, env_config.storage_key
    );

    env_config
}

/// 永続化スロットを開く
pub fn open_slot(env_config: &EnvironmentConfig) -> AppResult<SqliteSlot> {
    initialize_database(&env_config.database_path())
}

/// 保存済みの一覧を読み込んだサービスを作成する
pub fn open_service(env_config: &EnvironmentConfig) -> AppResult<SubscriptionService<SqliteSlot>> {
    let slot = open_slot(env_config)?;
    Ok(SubscriptionService::open(
        slot,
        &env_config.storage_key,
        collator_for(&env_config.collation_locale),
    ))
}
