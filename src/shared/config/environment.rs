use std::path::PathBuf;

/// 永続化スロットの既定キー（サブスクリプション一覧）
pub const DEFAULT_STORAGE_KEY: &str = "herewecoding_subscriptions_v1";

/// 永続化スロットの既定キー（テーマ設定）
pub const DEFAULT_THEME_KEY: &str = "herewecoding_theme_v1";

/// 名前ソートに使用する既定のロケール
pub const DEFAULT_COLLATION_LOCALE: &str = "tr";

/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

/// 環境設定を管理する構造体
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    /// 実行環境
    pub environment: String,
    /// ログレベル
    pub log_level: String,
    /// データディレクトリ
    pub data_dir: PathBuf,
    /// サブスクリプション一覧を保存するスロットのキー
    pub storage_key: String,
    /// テーマ設定を保存するスロットのキー
    pub theme_key: String,
    /// 名前ソートのロケール
    pub collation_locale: String,
}

impl EnvironmentConfig {
    /// 環境変数から設定を読み込む
    ///
    /// # 戻り値
    /// 環境設定
    pub fn from_env() -> Self {
        let environment = get_environment();
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
            if environment == Environment::Development {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

        let data_dir = std::env::var("DATA_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let storage_key = non_empty_var("STORAGE_KEY", DEFAULT_STORAGE_KEY);
        let theme_key = non_empty_var("THEME_KEY", DEFAULT_THEME_KEY);
        let collation_locale = non_empty_var("COLLATION_LOCALE", DEFAULT_COLLATION_LOCALE);

        Self {
            environment: format!("{environment:?}").to_lowercase(),
            log_level,
            data_dir,
            storage_key,
            theme_key,
            collation_locale,
        }
    }

    /// プロダクション環境かどうかを判定
    ///
    /// # 戻り値
    /// プロダクション環境の場合はtrue
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// データベースファイルのパスを取得
    pub fn database_path(&self) -> PathBuf {
        let env = if self.is_production() {
            Environment::Production
        } else {
            Environment::Development
        };
        self.data_dir.join(get_database_filename(env))
    }
}

/// 空でない環境変数を取得し、未設定の場合は既定値を返す
fn non_empty_var(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// 既定のデータディレクトリ
///
/// OSのデータディレクトリが取得できない場合はカレントディレクトリを使用する
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("subscription-tracker"))
        .unwrap_or_else(|| {
            log::warn!("データディレクトリを取得できないため、カレントディレクトリを使用します");
            PathBuf::from(".")
        })
}

/// 現在の実行環境を判定する
///
/// # 戻り値
/// 現在の実行環境（Development または Production）
///
/// # 判定ロジック
/// 1. 実行時環境変数 ENVIRONMENT を確認
/// 2. デバッグビルドの場合は Development
/// 3. リリースビルドの場合は Production
pub fn get_environment() -> Environment {
    if let Ok(env_var) = std::env::var("ENVIRONMENT") {
        let env = match env_var.as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        };
        log::debug!("環境判定: 実行時環境変数を使用 -> {env_var} -> {env:?}");
        return env;
    }

    // フォールバック: ビルド設定に基づく判定
    let env = if cfg!(debug_assertions) {
        Environment::Development
    } else {
        Environment::Production
    };
    log::debug!(
        "環境判定: ビルド設定を使用 -> debug_assertions={} -> {env:?}",
        cfg!(debug_assertions)
    );
    env
}

/// 環境に応じたデータベースファイル名を取得する
///
/// # ファイル名の規則
/// - 開発環境: "dev_subscriptions.db"
/// - プロダクション環境: "subscriptions.db"
pub fn get_database_filename(env: Environment) -> &'static str {
    match env {
        Environment::Development => "dev_subscriptions.db",
        Environment::Production => "subscriptions.db",
    }
}

/// 環境に応じた.envファイルを読み込む
pub fn load_environment_variables() {
    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    // 環境に応じた.envファイルのパスを決定
    let env_file = match environment.as_str() {
        "production" => ".env.production",
        _ => ".env",
    };

    log::info!("環境: {environment}, 読み込み対象: {env_file}");

    match dotenv::from_filename(env_file) {
        Ok(_) => {
            log::info!("{env_file}ファイルを読み込みました");
        }
        Err(_) => {
            // 環境固有のファイルがない場合は、デフォルトの.envを試行
            if env_file != ".env" && dotenv::dotenv().is_ok() {
                log::warn!("{env_file}が見つからないため、デフォルトの.envファイルを読み込みました");
            } else {
                log::warn!("環境変数ファイルが見つかりません。直接設定された環境変数を使用します。");
            }
        }
    }
}

/// ログシステムを初期化する
///
/// # 処理内容
/// 1. 環境設定からログレベルを決定
/// 2. env_loggerを初期化
pub fn initialize_logging_system(env_config: &EnvironmentConfig) {
    let log_level = parse_log_level(&env_config.log_level);

    // 二重初期化はテストなどで起こり得るため無視する
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .try_init();

    log::info!(
        "ログシステムを初期化しました: level={}, environment={}",
        env_config.log_level,
        env_config.environment
    );
}

/// ログレベル文字列をフィルタに変換する
fn parse_log_level(level: &str) -> log::LevelFilter {
    match level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    }
}
